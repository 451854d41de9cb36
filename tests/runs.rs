//! Integration tests for runs, players and users.

use serde_json::json;
use speedrun_api::{Embeds, Player, Run, RunFilter, SpeedrunClient, User};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SpeedrunClient {
    SpeedrunClient::with_base_url(&server.uri()).unwrap()
}

fn run_json() -> serde_json::Value {
    json!({
        "id": "90y6pm7e",
        "weblink": "https://www.speedrun.com/run/90y6pm7e",
        "game": "v1pxjz68",
        "category": "n2y3r8do",
        "level": null,
        "videos": null,
        "comment": "GG",
        "status": {
            "status": "verified",
            "examiner": "wzx7q875",
            "verify-date": "2015-01-15T22:31:20Z"
        },
        "players": [
            {"rel": "user", "id": "wzx7q875", "uri": "https://www.speedrun.com/api/v1/users/wzx7q875"},
            {"rel": "guest", "name": "Alex", "uri": "https://www.speedrun.com/api/v1/guests/Alex"}
        ],
        "date": "2015-01-14",
        "times": {"primary_t": 4196.5, "realtime_t": 4196.5},
        "system": {"platform": "1rjz039w", "emulated": false, "region": null},
        "splits": null,
        "values": {},
        "links": [
            {"rel": "examiner", "uri": "https://www.speedrun.com/api/v1/users/wzx7q875"}
        ]
    })
}

fn user_json() -> serde_json::Value {
    json!({
        "id": "wzx7q875",
        "names": {"international": "Pac", "japanese": null},
        "weblink": "https://www.speedrun.com/user/Pac",
        "name-style": {"style": "solid", "color": {"light": "#4646CE", "dark": "#6666EE"}},
        "role": "user",
        "signup": "2014-10-02T12:34:23Z",
        "location": null,
        "links": []
    })
}

#[tokio::test]
async fn fetches_a_run_with_times_and_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/runs/90y6pm7e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": run_json()})))
        .expect(1)
        .mount(&server)
        .await;

    let run = Run::by_id(&client(&server), "90y6pm7e", &Embeds::none())
        .await
        .unwrap();

    assert_eq!(run.comment.as_deref(), Some("GG"));
    assert_eq!(run.status.examiner(), Some("wzx7q875"));
    assert_eq!(run.times.primary.unwrap().format(), "1:09:56.500");
    assert!(!run.system.emulated);
}

#[tokio::test]
async fn players_are_fetched_link_by_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/runs/90y6pm7e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": run_json()})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/wzx7q875"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": user_json()})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/guests/Alex"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"name": "Alex", "links": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let run = Run::by_id(&client, "90y6pm7e", &Embeds::none())
        .await
        .unwrap();

    let players = run.players(&client).await.unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].name(), "Pac");
    assert!(matches!(players[1], Player::Guest(_)));
}

#[tokio::test]
async fn embedded_players_skip_the_network() {
    let server = MockServer::start().await;
    let mut run_json = run_json();
    run_json["players"] = json!({"data": [
        {"rel": "user", "id": "wzx7q875", "names": {"international": "Pac"}, "links": []},
        {"rel": "guest", "name": "Alex", "links": []}
    ]});

    Mock::given(method("GET"))
        .and(path("/runs/90y6pm7e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": run_json})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/wzx7q875"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let run = Run::by_id(&client, "90y6pm7e", &Embeds::new(["players"]))
        .await
        .unwrap();

    let players = run.players(&client).await.unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[1].name(), "Alex");
}

#[tokio::test]
async fn failing_player_lookup_aborts_the_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/runs/90y6pm7e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": run_json()})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/wzx7q875"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404, "message": "User not found"
        })))
        .mount(&server)
        .await;

    // the guest must not be requested once the user lookup failed
    Mock::given(method("GET"))
        .and(path("/guests/Alex"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"name": "Alex", "links": []}
        })))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let run = Run::by_id(&client, "90y6pm7e", &Embeds::none())
        .await
        .unwrap();

    let err = run.players(&client).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn run_list_applies_the_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/runs"))
        .and(query_param("game", "v1pxjz68"))
        .and(query_param("status", "verified"))
        .and(query_param("emulated", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [run_json()],
            "pagination": {"offset": 0, "max": 20, "size": 1, "links": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = RunFilter {
        game: Some("v1pxjz68".to_string()),
        status: Some("verified".to_string()),
        emulated: false.into(),
        ..Default::default()
    };

    let runs = Run::list(&client(&server), &filter, None, None, &Embeds::none())
        .await
        .unwrap();

    assert_eq!(runs.len(), 1);
    assert_eq!(runs.first().unwrap().id, "90y6pm7e");
}

#[tokio::test]
async fn examiner_follows_the_run_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/runs/90y6pm7e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": run_json()})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/wzx7q875"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": user_json()})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let run = Run::by_id(&client, "90y6pm7e", &Embeds::none())
        .await
        .unwrap();

    let examiner = run.examiner(&client).await.unwrap().unwrap();
    assert_eq!(examiner.names.international, "Pac");
}

#[tokio::test]
async fn user_personal_bests_come_back_as_a_flat_list() {
    let server = MockServer::start().await;

    let mut user_json = user_json();
    user_json["links"] = json!([
        {"rel": "personal-bests", "uri": "https://www.speedrun.com/api/v1/users/wzx7q875/personal-bests"}
    ]);

    Mock::given(method("GET"))
        .and(path("/users/wzx7q875"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": user_json})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/wzx7q875/personal-bests"))
        .and(query_param("top", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"place": 1, "run": run_json()},
                {"place": 4, "run": run_json()}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let user = User::by_id(&client, "wzx7q875").await.unwrap();

    let filter = speedrun_api::PersonalBestFilter {
        top: Some(5),
        ..Default::default()
    };
    let bests = user
        .personal_bests(&client, &filter, &Embeds::none())
        .await
        .unwrap();

    assert_eq!(bests.len(), 2);
    assert_eq!(bests[0].rank, 1);
    assert_eq!(bests[1].rank, 4);
}
