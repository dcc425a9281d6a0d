use super::*;

#[test]
fn parses_hotel_command() {
    let cli = Cli::try_parse_from([
        "reviewscrape",
        "hotel",
        "--url",
        "https://www.tripadvisor.com/Hotel_Review-g1-d2-Reviews-A-B.html",
        "--out",
        "hotel.csv",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Hotel { ref url, out: Some(ref out) }
            if url.ends_with("Reviews-A-B.html") && out.to_str() == Some("hotel.csv")
    ));
}

#[test]
fn hotel_requires_url() {
    assert!(Cli::try_parse_from(["reviewscrape", "hotel"]).is_err());
}

#[test]
fn parses_resto_command_with_all_fields() {
    let cli = Cli::try_parse_from([
        "reviewscrape",
        "resto",
        "--url",
        "https://www.tripadvisor.com/Restaurant_Review-g187147-d1751525-Reviews-Le_Cinq-Paris.html",
        "--name",
        "Le Cinq",
        "--id",
        "resto-7",
        "--position",
        "3",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Resto {
            name: Some(ref name),
            id: Some(ref id),
            position: 3,
            data_dir: None,
            ..
        } if name == "Le Cinq" && id == "resto-7"
    ));
}

#[test]
fn resto_position_defaults_to_zero_and_accepts_negatives() {
    let url = "https://www.tripadvisor.com/Restaurant_Review-g1-d2-Reviews-X-Y.html";
    let cli = Cli::try_parse_from(["reviewscrape", "resto", "--url", url]).unwrap();
    assert!(matches!(cli.command, Commands::Resto { position: 0, .. }));

    let cli =
        Cli::try_parse_from(["reviewscrape", "resto", "--url", url, "--position", "-4"]).unwrap();
    assert!(matches!(cli.command, Commands::Resto { position: -4, .. }));
}

#[test]
fn parses_combine_with_defaults() {
    let cli = Cli::try_parse_from(["reviewscrape", "combine"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Combine {
            data_dir: None,
            out: None
        }
    ));
}

#[test]
fn parses_run_with_entities_file() {
    let cli =
        Cli::try_parse_from(["reviewscrape", "run", "--entities", "config/entities.yaml"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Run { entities: Some(ref p), .. } if p.ends_with("entities.yaml")
    ));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["reviewscrape"]).is_err());
}

#[test]
fn resto_request_fills_name_and_id_from_url() {
    let request = scrape::RestoRequest {
        url: "https://www.tripadvisor.com/Restaurant_Review-g187147-d1751525-Reviews-Le_Cinq-Paris.html"
            .to_owned(),
        name: None,
        id: None,
        position: 2,
    };
    let target = request.target().unwrap();
    assert_eq!(target.name, "Le Cinq");
    assert_eq!(target.id, "d1751525");
    assert_eq!(target.position, 2);
    assert_eq!(target.slug, "Le_Cinq");
}

#[test]
fn resto_request_prefers_explicit_name_and_id() {
    let request = scrape::RestoRequest {
        url: "https://www.tripadvisor.com/Restaurant_Review-g187147-d1751525-Reviews-Le_Cinq-Paris.html"
            .to_owned(),
        name: Some("Le Cinq (Four Seasons)".to_owned()),
        id: Some("resto-7".to_owned()),
        position: 0,
    };
    let target = request.target().unwrap();
    assert_eq!(target.name, "Le Cinq (Four Seasons)");
    assert_eq!(target.id, "resto-7");
}

#[test]
fn resto_request_rejects_hotel_url() {
    let request = scrape::RestoRequest {
        url: "https://www.tripadvisor.com/Hotel_Review-g1-d2-Reviews-A-B.html".to_owned(),
        name: None,
        id: None,
        position: 0,
    };
    assert!(request.target().is_err());
}
