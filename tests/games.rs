//! Integration tests for game fetching and relationship resolution.
//!
//! Uses wiremock to mock the speedrun.com API and verify request shapes,
//! embed handling and error propagation.

use serde_json::json;
use speedrun_api::{Category, Embeds, Error, Game, GameFilter, ModLevel, Sorting, SpeedrunClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SpeedrunClient {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    SpeedrunClient::with_base_url(&server.uri()).unwrap()
}

fn sms_json() -> serde_json::Value {
    json!({
        "id": "v1pxjz68",
        "names": {"international": "Super Mario Sunshine", "japanese": null},
        "abbreviation": "sms",
        "weblink": "https://www.speedrun.com/sms",
        "released": 2002,
        "ruleset": {
            "show-milliseconds": false,
            "require-verification": true,
            "require-video": false,
            "run-times": ["realtime", "realtime_noloads"],
            "default-time": "realtime",
            "emulators-allowed": true
        },
        "romhack": false,
        "created": "2014-12-07T12:50:20Z",
        "platforms": ["1rjz039w", "4nv59gjk"],
        "regions": ["pr184lqn", "e6lxy1dz"],
        "moderators": {"vqxkmj07": "moderator", "3qjn18m1": "super-moderator"},
        "assets": {},
        "links": [
            {"rel": "self", "uri": "https://www.speedrun.com/api/v1/games/v1pxjz68"},
            {"rel": "categories", "uri": "https://www.speedrun.com/api/v1/games/v1pxjz68/categories"},
            {"rel": "runs", "uri": "https://www.speedrun.com/api/v1/runs?game=v1pxjz68"}
        ]
    })
}

#[tokio::test]
async fn fetches_a_game_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games/v1pxjz68"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": sms_json()})))
        .expect(1)
        .mount(&server)
        .await;

    let game = Game::by_id(&client(&server), "v1pxjz68", &Embeds::none())
        .await
        .unwrap();

    assert_eq!(game.names.international, "Super Mario Sunshine");
    assert_eq!(game.released, 2002);
    assert_eq!(game.platform_ids(), vec!["1rjz039w", "4nv59gjk"]);
    assert_eq!(
        game.moderator_map().get("3qjn18m1"),
        Some(&ModLevel::SuperModerator)
    );
}

#[tokio::test]
async fn game_list_sends_filter_sorting_and_embed_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .and(query_param("name", "mario"))
        .and(query_param("released", "2002"))
        .and(query_param("romhack", "no"))
        .and(query_param("orderby", "released"))
        .and(query_param("direction", "desc"))
        .and(query_param("embed", "platforms,regions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [sms_json()],
            "pagination": {"offset": 0, "max": 20, "size": 1, "links": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = GameFilter {
        name: Some("mario".to_string()),
        released: Some(2002),
        romhack: false.into(),
        ..Default::default()
    };

    let games = Game::list(
        &client(&server),
        &filter,
        Some(&Sorting::by("released").descending()),
        None,
        &Embeds::new(["platforms", "regions"]),
    )
    .await
    .unwrap();

    assert_eq!(games.len(), 1);
    assert_eq!(games.first().unwrap().abbreviation, "sms");
}

#[tokio::test]
async fn embedded_platforms_need_no_further_requests() {
    let server = MockServer::start().await;
    let mut game_json = sms_json();
    game_json["platforms"] = json!({"data": [
        {"id": "1rjz039w", "name": "GameCube", "released": 2001, "links": []},
        {"id": "4nv59gjk", "name": "Wii", "released": 2006, "links": []}
    ]});

    Mock::given(method("GET"))
        .and(path("/games/v1pxjz68"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": game_json})))
        .expect(1)
        .mount(&server)
        .await;

    // any platform request would be a bug
    Mock::given(method("GET"))
        .and(path("/platforms/1rjz039w"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let game = Game::by_id(&client, "v1pxjz68", &Embeds::new(["platforms"]))
        .await
        .unwrap();

    let platforms = game.platforms(&client).await.unwrap();
    assert_eq!(platforms.len(), 2);
    assert_eq!(platforms[0].name, "GameCube");
}

#[tokio::test]
async fn bare_platform_ids_are_resolved_one_by_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games/v1pxjz68"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": sms_json()})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/platforms/1rjz039w"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "1rjz039w", "name": "GameCube", "released": 2001, "links": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/platforms/4nv59gjk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "4nv59gjk", "name": "Wii", "released": 2006, "links": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let game = Game::by_id(&client, "v1pxjz68", &Embeds::none())
        .await
        .unwrap();

    let platforms = game.platforms(&client).await.unwrap();
    assert_eq!(platforms.len(), 2);
    assert_eq!(platforms[1].name, "Wii");
}

#[tokio::test]
async fn failing_platform_lookup_aborts_the_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games/v1pxjz68"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": sms_json()})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/platforms/1rjz039w"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404, "message": "Platform not found"
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let game = Game::by_id(&client, "v1pxjz68", &Embeds::none())
        .await
        .unwrap();

    let err = game.platforms(&client).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn categories_follow_the_resource_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games/v1pxjz68"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": sms_json()})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/games/v1pxjz68/categories"))
        .and(query_param("miscellaneous", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "n2y3r8do",
                "name": "Any%",
                "weblink": "https://www.speedrun.com/sms#Any",
                "type": "per-game",
                "rules": null,
                "players": {"type": "exactly", "value": 1},
                "miscellaneous": false,
                "links": []
            }],
            "pagination": {"offset": 0, "max": 20, "size": 1, "links": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let game = Game::by_id(&client, "v1pxjz68", &Embeds::none())
        .await
        .unwrap();

    let filter = speedrun_api::CategoryFilter {
        miscellaneous: false.into(),
    };
    let categories = game
        .categories(&client, &filter, None, &Embeds::none())
        .await
        .unwrap();

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Any%");
}

#[tokio::test]
async fn repeated_and_link_based_fetches_decode_to_equal_values() {
    let server = MockServer::start().await;

    // two direct fetches plus one through the category's game link
    Mock::given(method("GET"))
        .and(path("/games/v1pxjz68"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": sms_json()})))
        .expect(3)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/categories/n2y3r8do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "n2y3r8do",
                "name": "Any%",
                "weblink": "https://www.speedrun.com/sms#Any",
                "type": "per-game",
                "rules": null,
                "players": {"type": "exactly", "value": 1},
                "miscellaneous": false,
                "links": [
                    {"rel": "game", "uri": "https://www.speedrun.com/api/v1/games/v1pxjz68"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = client(&server);

    let first = Game::by_id(&client, "v1pxjz68", &Embeds::none())
        .await
        .unwrap();
    let second = Game::by_id(&client, "v1pxjz68", &Embeds::none())
        .await
        .unwrap();
    assert_eq!(first, second);

    let category = Category::by_id(&client, "n2y3r8do", &Embeds::none())
        .await
        .unwrap();
    let through_link = category
        .game(&client, &Embeds::none())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first, through_link);
}

#[tokio::test]
async fn missing_game_surfaces_the_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404, "message": "Game not found"
        })))
        .mount(&server)
        .await;

    let err = Game::by_id(&client(&server), "nope", &Embeds::none())
        .await
        .unwrap_err();

    match err {
        Error::Upstream {
            status, message, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Game not found");
        }
        other => panic!("expected an upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn html_error_page_becomes_bad_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games/v1pxjz68"))
        .respond_with(
            ResponseTemplate::new(503).set_body_string("<html>scheduled maintenance</html>"),
        )
        .mount(&server)
        .await;

    let err = Game::by_id(&client(&server), "v1pxjz68", &Embeds::none())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::BadJson { .. }));
    assert_eq!(err.status(), None);
}
