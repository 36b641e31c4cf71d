//! The declarative scenario catalog for the API Challenges Todo service.
//!
//! Declaration order is execution order: the service's todo collection is
//! shared mutable state for the whole session, so scenarios that consume an
//! earlier scenario's side effect say so with `depends_on`.

use serde_json::{json, Map, Value};
use todocheck::{
    BasicCredentials, BodyMatch, LengthBound, Scenario, ValueMatch, AUTH_TOKEN_HEADER,
    SESSION_HEADER,
};

pub const CREATE_TODO: &str = "POST /todos (201)";
pub const DELETE_TODO_1: &str = "DELETE /todos/1 (200)";
pub const CREATE_XML: &str = "POST /todos (201) xml body";
pub const CREATE_JSON: &str = "POST /todos (201) json body";
pub const CHALLENGER_SNAPSHOT: &str = "GET /challenger/{token} (200)";
pub const DATABASE_GET: &str = "GET /challenger/database/{token} (200)";
pub const DATABASE_RESET: &str = "PUT /challenger/database/{token} (204)";
pub const CROSS_XML_TO_JSON: &str = "POST /todos (201) xml body, json response";
pub const CROSS_JSON_TO_XML: &str = "POST /todos (201) json body, xml response";
pub const SECRET_TOKEN: &str = "POST /secret/token (201)";

/// The whole suite, in the order the original run sequences it.
pub fn full_suite() -> Vec<Scenario> {
    let mut suite = Vec::new();
    suite.extend(listing());
    suite.extend(todo_creation());
    suite.extend(todo_updates());
    suite.extend(negotiation());
    suite.extend(challenger_state());
    suite.extend(cross_format());
    suite.extend(secret_note());
    suite.extend(heartbeat());
    suite.extend(capacity());
    suite
}

/// Challenge listing and the seeded `/todos` collection.
pub fn listing() -> Vec<Scenario> {
    vec![
        Scenario::get("GET /challenges (200)", "/challenges")
            .expect_status(200)
            .expect_body(BodyMatch::Length {
                pointer: String::from("/challenges"),
                bound: LengthBound::Exactly(59),
            }),
        Scenario::get("GET /todos (200)", "/todos")
            .expect_status(200)
            .expect_body(BodyMatch::Length {
                pointer: String::from("/todos"),
                bound: LengthBound::Exactly(10),
            }),
        Scenario::get("GET /todo (404) not plural", "/todo").expect_status(404),
        Scenario::get("GET /todos/3 (200)", "/todos/3")
            .expect_status(200)
            .expect_body(BodyMatch::ArrayContains {
                pointer: String::from("/todos"),
                element: json!({
                    "id": 3,
                    "title": "process payments",
                    "doneStatus": false,
                    "description": ""
                }),
            }),
        Scenario::get("GET /todos/33 (404)", "/todos/33").expect_status(404),
        Scenario::head("HEAD /todos (200)", "/todos")
            .expect_status(200)
            .expect_header("content-type", ValueMatch::Present),
        Scenario::new(
            "OPTIONS /todos (200)",
            todocheck::Verb::Options,
            "/todos",
        )
        .expect_status(200)
        .expect_header("allow", ValueMatch::contains("GET")),
    ]
}

/// Creation contracts: the happy path plus every validation rejection the
/// service advertises.
pub fn todo_creation() -> Vec<Scenario> {
    vec![
        Scenario::post(CREATE_TODO, "/todos")
            .json_body(json!({
                "title": "QA check",
                "doneStatus": true,
                "description": "QA check"
            }))
            .expect_status(201)
            .expect_body(BodyMatch::JsonSubset(json!({
                "title": "QA check",
                "doneStatus": true,
                "description": "QA check"
            })))
            .capture_body("todo_id", "/id"),
        // round trip: the created resource reads back exactly as submitted
        Scenario::get("GET /todos/{todo_id} (200) round trip", "/todos/{todo_id}")
            .depends_on(CREATE_TODO)
            .expect_status(200)
            .expect_body(BodyMatch::ArrayContains {
                pointer: String::from("/todos"),
                element: json!({
                    "title": "QA check",
                    "doneStatus": true,
                    "description": "QA check"
                }),
            }),
        Scenario::post("POST /todos (400) doneStatus not boolean", "/todos")
            .json_body(json!({
                "title": "QA check1",
                "doneStatus": 3,
                "description": "QA check1"
            }))
            .expect_status(400)
            .expect_body(BodyMatch::JsonSubset(json!({
                "errorMessages":
                    ["Failed Validation: doneStatus should be BOOLEAN but was NUMERIC"]
            }))),
        Scenario::post("POST /todos (400) title too long", "/todos")
            .json_body(json!({
                "title": "x".repeat(51),
                "doneStatus": true,
                "description": "QA check2"
            }))
            .expect_status(400)
            .expect_body(BodyMatch::ArrayContains {
                pointer: String::from("/errorMessages"),
                element: json!(
                    "Failed Validation: Maximum allowable length exceeded for title \
                     - maximum allowed is 50"
                ),
            }),
        Scenario::post("POST /todos (400) description too long", "/todos")
            .json_body(json!({
                "title": "Title",
                "doneStatus": true,
                "description": "x".repeat(201)
            }))
            .expect_status(400)
            .expect_body(BodyMatch::ArrayContains {
                pointer: String::from("/errorMessages"),
                element: json!(
                    "Failed Validation: Maximum allowable length exceeded for description \
                     - maximum allowed is 200"
                ),
            }),
        // both fields at exactly their documented limits are accepted
        Scenario::post("POST /todos (201) boundary lengths", "/todos")
            .json_body(json!({
                "title": "y".repeat(50),
                "doneStatus": true,
                "description": "y".repeat(200)
            }))
            .expect_status(201)
            .expect_body(BodyMatch::Length {
                pointer: String::from("/title"),
                bound: LengthBound::AtMost(50),
            })
            .expect_body(BodyMatch::Length {
                pointer: String::from("/description"),
                bound: LengthBound::AtMost(200),
            }),
        Scenario::post("POST /todos (413) payload too large", "/todos")
            .json_body(json!({
                "title": "Full title",
                "doneStatus": true,
                "description": "z".repeat(5000)
            }))
            .expect_status(413)
            .expect_body(BodyMatch::ArrayContains {
                pointer: String::from("/errorMessages"),
                element: json!("Error: Request body too large, max allowed is 5000 bytes"),
            }),
        Scenario::post("POST /todos (400) unrecognised field", "/todos")
            .json_body(json!({
                "title": "Full title",
                "doneStatus": true,
                "description": "",
                "tags": {"badge": 1, "New": "satisfies"}
            }))
            .expect_status(400)
            .expect_body(BodyMatch::ArrayContains {
                pointer: String::from("/errorMessages"),
                element: json!("Could not find field: tags"),
            }),
    ]
}

/// Update and delete contracts against the seeded todos.
pub fn todo_updates() -> Vec<Scenario> {
    vec![
        Scenario::put("PUT /todos/1 full (200)", "/todos/1")
            .json_body(json!({
                "title": "Put Method",
                "doneStatus": true,
                "description": "Put Method"
            }))
            .expect_status(200)
            .expect_body(BodyMatch::JsonSubset(json!({
                "title": "Put Method",
                "doneStatus": true,
                "description": "Put Method"
            }))),
        Scenario::put("PUT /todos/1 partial (200)", "/todos/1")
            .json_body(json!({"title": "Put Method Partly2"}))
            .expect_status(200)
            .expect_body(BodyMatch::JsonSubset(json!({"title": "Put Method Partly2"}))),
        Scenario::put("PUT /todos/1 (400) missing title", "/todos/1")
            .json_body(json!({"doneStatus": true}))
            .expect_status(400)
            .expect_body(BodyMatch::ArrayContains {
                pointer: String::from("/errorMessages"),
                element: json!("title : field is mandatory"),
            }),
        Scenario::put("PUT /todos/1 (400) amend id", "/todos/1")
            .json_body(json!({"id": 2, "title": "Put Method", "doneStatus": true}))
            .expect_status(400)
            .expect_body(BodyMatch::ArrayContains {
                pointer: String::from("/errorMessages"),
                element: json!("Can not amend id from 1 to 2"),
            }),
        Scenario::put("PUT /todos/33 (400) cannot create", "/todos/33")
            .json_body(json!({"title": "Put Method for creating entity", "doneStatus": true}))
            .expect_status(400)
            .expect_body(BodyMatch::ArrayContains {
                pointer: String::from("/errorMessages"),
                element: json!("Cannot create todo with PUT due to Auto fields id"),
            }),
        Scenario::post("POST /todos/9 (200) update", "/todos/9")
            .json_body(json!({"title": "POST1"}))
            .expect_status(200)
            .expect_body(BodyMatch::JsonSubset(json!({"title": "POST1"}))),
        Scenario::post("POST /todos/47 (404) unknown id", "/todos/47")
            .json_body(json!({"title": "POST1"}))
            .expect_status(404)
            .expect_body(BodyMatch::JsonSubset(json!({
                "errorMessages": ["No such todo entity instance with id == 47 found"]
            }))),
        Scenario::get("GET /todos?doneStatus=true (200) filter", "/todos?doneStatus=true")
            .expect_status(200)
            .expect_body(BodyMatch::EachContains {
                pointer: String::from("/todos"),
                element: json!({"doneStatus": true}),
            }),
        Scenario::delete(DELETE_TODO_1, "/todos/1").expect_status(200),
    ]
}

/// The accept/content-type negotiation matrix (spec'd precedence: explicit
/// XML beats JSON, empty accept defaults to JSON, unsupported is 406).
pub fn negotiation() -> Vec<Scenario> {
    vec![
        Scenario::get("GET /todos (200) accept xml", "/todos")
            .header("accept", "application/xml")
            .expect_status(200)
            .expect_header("content-type", ValueMatch::contains("application/xml")),
        Scenario::get("GET /todos (200) accept json", "/todos")
            .header("accept", "application/json")
            .expect_status(200)
            .expect_header("content-type", ValueMatch::contains("application/json")),
        Scenario::get("GET /todos (200) accept any", "/todos")
            .header("accept", "*/*")
            .expect_status(200)
            .expect_header("content-type", ValueMatch::contains("application/json"))
            .expect_header("x-robots-tag", ValueMatch::exact("noindex"))
            .expect_header("server", ValueMatch::contains("Jetty")),
        Scenario::get("GET /todos (200) xml preferred", "/todos")
            .header("accept", "application/xml, application/json")
            .expect_status(200)
            .expect_header("content-type", ValueMatch::contains("application/xml")),
        Scenario::get("GET /todos (200) no accept", "/todos")
            .header("accept", "")
            .expect_status(200)
            .expect_header("content-type", ValueMatch::contains("application/json")),
        Scenario::get("GET /todos (406) unsupported accept", "/todos")
            .header("accept", "application/gzip")
            .expect_status(406)
            .expect_body(BodyMatch::JsonSubset(json!({
                "errorMessages": ["Unrecognised Accept Type"]
            }))),
        Scenario::post(CREATE_XML, "/todos")
            .header("accept", "application/xml")
            .xml_body(
                "<todo>\
                   <title>XML format</title>\
                   <doneStatus>true</doneStatus>\
                   <description>file paperwork today</description>\
                 </todo>",
            )
            .expect_status(201)
            .expect_header("content-type", ValueMatch::contains("application/xml"))
            .expect_body(BodyMatch::Contains(String::from("<title>XML format</title>"))),
        Scenario::post(CREATE_JSON, "/todos")
            .header("accept", "application/json")
            .json_body(json!({
                "title": "JSON format",
                "description": "json format only",
                "doneStatus": true
            }))
            .expect_status(201)
            .expect_header("content-type", ValueMatch::contains("application/json"))
            .expect_body(BodyMatch::JsonSubset(json!({
                "title": "JSON format",
                "description": "json format only",
                "doneStatus": true
            }))),
        Scenario::post("POST /todos (415) unsupported content type", "/todos")
            .header("content-type", "popi")
            .json_body(json!({
                "title": "Unsupported format",
                "description": "Unsupported format",
                "doneStatus": true
            }))
            .expect_status(415)
            .expect_body(BodyMatch::JsonSubset(json!({
                "errorMessages": ["Unsupported Content Type - popi"]
            }))),
    ]
}

/// Challenger progress state: snapshot, restore, and the database reset
/// that pins the collection to a known 13 todos.
pub fn challenger_state() -> Vec<Scenario> {
    vec![
        Scenario::get(CHALLENGER_SNAPSHOT, "/challenger/{token}")
            .expect_status(200)
            .expect_body(BodyMatch::Exists(String::from("/challengeStatus")))
            .capture_body("client_guid", "/xAuthToken"),
        Scenario::put("PUT /challenger/{token} (200) restore", "/challenger/{token}")
            .depends_on(CHALLENGER_SNAPSHOT)
            .json_body(challenge_status_payload())
            .expect_status(200)
            .expect_body(BodyMatch::JsonSubset(json!({"secretNote": ""}))),
        // External-contract assumption: the service accepts a PUT to a
        // client-chosen GUID and creates a brand-new challenger from it.
        // This is undocumented behavior; nothing else depends on it.
        Scenario::put(
            "put challenger with client guid creates challenger (assumed contract)",
            "/challenger/{client_guid}",
        )
        .depends_on(CHALLENGER_SNAPSHOT)
        .header(SESSION_HEADER, "{client_guid}")
        .json_body(challenge_status_payload_for("{client_guid}"))
        .expect_status(201),
        Scenario::get(DATABASE_GET, "/challenger/database/{token}")
            .depends_on(CREATE_TODO)
            .depends_on(DELETE_TODO_1)
            .depends_on(CREATE_XML)
            .depends_on(CREATE_JSON)
            .expect_status(200)
            .expect_body(BodyMatch::Length {
                pointer: String::from("/todos"),
                bound: LengthBound::Exactly(13),
            }),
        Scenario::put(DATABASE_RESET, "/challenger/database/{token}")
            .depends_on(DATABASE_GET)
            .json_body(database_payload())
            .expect_status(204),
    ]
}

/// Cross-format translation: the submitted representation and the accepted
/// representation are independent.
pub fn cross_format() -> Vec<Scenario> {
    vec![
        Scenario::post(CROSS_XML_TO_JSON, "/todos")
            .header("accept", "application/json")
            .xml_body(
                "<todo>\
                   <title>xml in json out</title>\
                   <doneStatus>true</doneStatus>\
                   <description>translated</description>\
                 </todo>",
            )
            .expect_status(201)
            .expect_header("content-type", ValueMatch::contains("application/json"))
            .expect_body(BodyMatch::JsonSubset(json!({
                "title": "xml in json out",
                "doneStatus": true,
                "description": "translated"
            }))),
        Scenario::post(CROSS_JSON_TO_XML, "/todos")
            .header("accept", "application/xml")
            .json_body(json!({
                "title": "json in xml out",
                "doneStatus": true,
                "description": "translated"
            }))
            .expect_status(201)
            .expect_header("content-type", ValueMatch::contains("application/xml"))
            .expect_body(BodyMatch::Contains(String::from(
                "<title>json in xml out</title>",
            ))),
    ]
}

/// The secret note behind the secondary token, reachable through either the
/// custom header or a standard bearer Authorization.
pub fn secret_note() -> Vec<Scenario> {
    let valid = BasicCredentials::new("admin", "password");
    let invalid = BasicCredentials::new("admin", "wrong");
    vec![
        Scenario::post("POST /secret/token (401) wrong credentials", "/secret/token")
            .header("authorization", invalid.authorization_value())
            .expect_status(401),
        Scenario::get("GET /secret/note (401) no token", "/secret/note").expect_status(401),
        Scenario::post(SECRET_TOKEN, "/secret/token")
            .header("authorization", valid.authorization_value())
            .expect_status(201)
            .expect_header(AUTH_TOKEN_HEADER, ValueMatch::Present)
            .capture_header("auth_token", AUTH_TOKEN_HEADER),
        Scenario::get("GET /secret/note (403) bogus token", "/secret/note")
            .header(AUTH_TOKEN_HEADER, "bogus-token")
            .expect_status(403),
        Scenario::get("GET /secret/note (200) x-auth-token", "/secret/note")
            .depends_on(SECRET_TOKEN)
            .header(AUTH_TOKEN_HEADER, "{auth_token}")
            .expect_status(200)
            .expect_body(BodyMatch::Exists(String::from("/note"))),
        Scenario::post("POST /secret/note (200) x-auth-token", "/secret/note")
            .depends_on(SECRET_TOKEN)
            .header(AUTH_TOKEN_HEADER, "{auth_token}")
            .json_body(json!({"note": "my note"}))
            .expect_status(200)
            .expect_body(BodyMatch::JsonSubset(json!({"note": "my note"}))),
        Scenario::get("GET /secret/note (200) bearer", "/secret/note")
            .depends_on("POST /secret/note (200) x-auth-token")
            .header("authorization", "Bearer {auth_token}")
            .expect_status(200)
            .expect_body(BodyMatch::JsonSubset(json!({"note": "my note"}))),
        Scenario::post("POST /secret/note (200) bearer", "/secret/note")
            .depends_on(SECRET_TOKEN)
            .header("authorization", "Bearer {auth_token}")
            .json_body(json!({"note": "bearer note"}))
            .expect_status(200)
            .expect_body(BodyMatch::JsonSubset(json!({"note": "bearer note"}))),
    ]
}

/// Heartbeat verb contracts, directly and through the override header.
pub fn heartbeat() -> Vec<Scenario> {
    vec![
        Scenario::get("GET /heartbeat (204)", "/heartbeat")
            .expect_status(204)
            .expect_body(BodyMatch::Absent),
        Scenario::delete("DELETE /heartbeat (405)", "/heartbeat").expect_status(405),
        Scenario::patch("PATCH /heartbeat (500)", "/heartbeat").expect_status(500),
        Scenario::trace("TRACE /heartbeat (501)", "/heartbeat").expect_status(501),
        Scenario::with_override("override DELETE /heartbeat (405)", "DELETE", "/heartbeat")
            .expect_status(405),
        Scenario::with_override("override PATCH /heartbeat (500)", "PATCH", "/heartbeat")
            .expect_status(500),
        Scenario::with_override("override TRACE /heartbeat (501)", "TRACE", "/heartbeat")
            .expect_status(501),
    ]
}

/// Fill the collection to the 20-todo maximum, prove the 21st create is
/// refused, and prove the count didn't move.
pub fn capacity() -> Vec<Scenario> {
    // After the database reset (13) and the two cross-format creates (15),
    // five more reach the limit.
    let mut scenarios = Vec::new();
    let mut previous = String::from(CROSS_JSON_TO_XML);
    for count in 16..=20 {
        let name = format!("fill collection to capacity ({} of 20)", count);
        scenarios.push(
            Scenario::post(name.clone(), "/todos")
                .depends_on(DATABASE_RESET)
                .depends_on(previous)
                .json_body(json!({
                    "title": format!("filler {}", count),
                    "doneStatus": false,
                    "description": ""
                }))
                .expect_status(201),
        );
        previous = name;
    }
    scenarios.push(
        Scenario::post("POST /todos (400) over capacity", "/todos")
            .depends_on(previous)
            .json_body(json!({
                "title": "one too many",
                "doneStatus": false,
                "description": ""
            }))
            .expect_status(400)
            .expect_body(BodyMatch::ArrayContains {
                pointer: String::from("/errorMessages"),
                element: json!("ERROR: Cannot add instance, maximum limit of 20 reached"),
            }),
    );
    scenarios.push(
        Scenario::get("GET /todos (200) at capacity", "/todos")
            .depends_on("POST /todos (400) over capacity")
            .expect_status(200)
            .expect_body(BodyMatch::Length {
                pointer: String::from("/todos"),
                bound: LengthBound::Exactly(20),
            }),
    );
    scenarios
}

fn challenge_status_payload() -> Value {
    challenge_status_payload_for("{token}")
}

fn challenge_status_payload_for(challenger: &str) -> Value {
    let mut status = Map::new();
    for (challenge, done) in CHALLENGE_STATUS {
        status.insert(String::from(*challenge), Value::Bool(*done));
    }
    json!({
        "xChallenger": challenger,
        "secretNote": "",
        "challengeStatus": Value::Object(status)
    })
}

// Progress snapshot used by the restore scenarios, as of the point in the
// run where they execute.
const CHALLENGE_STATUS: &[(&str, bool)] = &[
    ("PUT_RESTORABLE_CHALLENGER_PROGRESS_STATUS", false),
    ("GET_TODOS", true),
    ("PUT_NEW_RESTORED_CHALLENGER_PROGRESS_STATUS", false),
    ("POST_TODOS", true),
    ("OVERRIDE_PATCH_HEARTBEAT_500", false),
    ("POST_TODOS_TOO_LONG_DESCRIPTION_LENGTH", true),
    ("GET_RESTORABLE_CHALLENGER_PROGRESS_STATUS", true),
    ("POST_SECRET_NOTE_401", false),
    ("PUT_TODOS_PARTIAL_200", true),
    ("GET_TODOS_FILTERED", true),
    ("GET_TODO_404", true),
    ("PUT_TODOS_400_NO_AMEND_ID", true),
    ("GET_HEARTBEAT_204", false),
    ("POST_TODOS_INVALID_EXTRA_FIELD", true),
    ("POST_SECRET_NOTE_BEARER_200", false),
    ("POST_CREATE_XML_ACCEPT_JSON", false),
    ("GET_ACCEPT_XML_PREFERRED", true),
    ("POST_SECRET_NOTE_200", false),
    ("CREATE_NEW_CHALLENGER", true),
    ("POST_UPDATE_TODO", true),
    ("GET_CHALLENGES", true),
    ("GET_HEAD_TODOS", true),
    ("POST_SECRET_NOTE_403", false),
    ("GET_RESTORABLE_TODOS", false),
    ("GET_ACCEPT_XML", true),
    ("POST_TODOS_415", true),
    ("GET_ACCEPT_JSON", true),
    ("CREATE_SECRET_TOKEN_201", false),
    ("OVERRIDE_DELETE_HEARTBEAT_405", false),
    ("POST_TODOS_BAD_DONE_STATUS", true),
    ("GET_SECRET_NOTE_200", false),
    ("OVERRIDE_TRACE_HEARTBEAT_501", false),
    ("POST_TODOS_404", true),
    ("POST_CREATE_JSON_ACCEPT_XML", false),
    ("GET_SECRET_NOTE_BEARER_200", false),
    ("GET_TODO", true),
    ("PUT_TODOS_FULL_200", true),
    ("GET_ACCEPT_ANY_DEFAULT_JSON", true),
    ("GET_SECRET_NOTE_401", false),
    ("POST_MAX_OUT_TITLE_DESCRIPTION_LENGTH", true),
    ("POST_CREATE_JSON", true),
    ("PATCH_HEARTBEAT_500", false),
    ("DELETE_A_TODO", true),
    ("DELETE_ALL_TODOS", false),
    ("POST_TODOS_TOO_LONG_PAYLOAD_SIZE", true),
    ("TRACE_HEARTBEAT_501", false),
    ("DELETE_HEARTBEAT_405", false),
    ("POST_ALL_TODOS", false),
    ("GET_SECRET_NOTE_403", false),
    ("PUT_TODOS_MISSING_TITLE_400", true),
    ("OPTIONS_TODOS", false),
    ("GET_JSON_BY_DEFAULT_NO_ACCEPT", true),
    ("POST_TODOS_TOO_LONG_TITLE_LENGTH", true),
    ("PUT_RESTORABLE_TODOS", false),
    ("GET_TODOS_NOT_PLURAL_404", true),
    ("POST_CREATE_XML", true),
    ("CREATE_SECRET_TOKEN_401", false),
    ("PUT_TODOS_400", true),
    ("GET_UNSUPPORTED_ACCEPT_406", true),
];

fn database_payload() -> Value {
    json!({
        "todos": [
            {"id": 11, "title": "111", "doneStatus": true, "description": "111"},
            {"id": 4, "title": "222"},
            {"id": 17, "title": "XML format333", "doneStatus": true, "description": "333"},
            {"id": 3, "title": "444"},
            {"id": 10, "title": "444"},
            {"id": 9, "title": "tidy 444"},
            {"id": 8, "title": "444"},
            {"id": 7, "title": "444"},
            {"id": 5, "title": "444"},
            {"id": 2, "title": "444"},
            {"id": 6, "title": "444"},
            {"id": 15, "title": "555", "doneStatus": true, "description": "666"},
            {"id": 18, "title": "JSON format 777", "doneStatus": true, "description": "json format only 777"}
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn the_catalog_declares_a_valid_scenario_graph() {
        let suite = full_suite();
        let mut seen: HashSet<&str> = HashSet::new();
        for scenario in &suite {
            for dependency in scenario.dependencies() {
                assert!(
                    seen.contains(dependency.as_str()),
                    "'{}' depends on '{}' which is not declared before it",
                    scenario.name(),
                    dependency
                );
            }
            assert!(
                seen.insert(scenario.name()),
                "duplicate scenario name '{}'",
                scenario.name()
            );
        }
    }

    #[test]
    fn the_progress_snapshot_covers_all_59_challenges() {
        assert_eq!(CHALLENGE_STATUS.len(), 59);
        let payload = challenge_status_payload();
        assert_eq!(
            payload["challengeStatus"].as_object().unwrap().len(),
            59
        );
        assert_eq!(payload["xChallenger"], "{token}");
    }

    #[test]
    fn the_database_reset_pins_thirteen_todos() {
        assert_eq!(database_payload()["todos"].as_array().unwrap().len(), 13);
    }

    #[test]
    fn boundary_scenarios_use_exact_limit_lengths() {
        assert_eq!("x".repeat(51).len(), 51);
        for scenario in todo_creation() {
            if scenario.name() == "POST /todos (201) boundary lengths" {
                if let todocheck::Payload::Json(body) = scenario.payload() {
                    assert_eq!(body["title"].as_str().unwrap().len(), 50);
                    assert_eq!(body["description"].as_str().unwrap().len(), 200);
                    return;
                }
            }
        }
        panic!("boundary scenario missing from the catalog");
    }
}
