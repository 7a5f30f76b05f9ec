//! End-to-end tests: layout output through the Adaptive Card serializer

use teams_deploy_card::github::CommitDetails;
use teams_deploy_card::layout::{changelog, compact, cozy};
use teams_deploy_card::{
    render_message, Account, ActionInputs, Commit, RunInfo, RunStatus,
};

fn sample_run() -> RunInfo {
    RunInfo {
        owner: "octocat".to_string(),
        repo: "hello-world".to_string(),
        repository: "octocat/hello-world".to_string(),
        branch: "main".to_string(),
        sha: "a1b2c3d4e5f6a7b8c9d0".to_string(),
        short_sha: "a1b2c3d".to_string(),
        run_id: "314159".to_string(),
        run_num: "42".to_string(),
        event_name: "push".to_string(),
        job_name: "build".to_string(),
        repo_url: "https://github.com/octocat/hello-world".to_string(),
        branch_url: "https://github.com/octocat/hello-world/tree/main".to_string(),
        run_link: "https://github.com/octocat/hello-world/actions/runs/314159".to_string(),
        before_sha: None,
    }
}

fn sample_commit() -> Commit {
    Commit {
        sha: "a1b2c3d4e5f6a7b8c9d0".to_string(),
        html_url: "https://github.com/octocat/hello-world/commit/a1b2c3d4".to_string(),
        commit: CommitDetails {
            message: "Fix the build".to_string(),
        },
        author: Some(Account {
            login: "octocat".to_string(),
            html_url: "https://github.com/octocat".to_string(),
            avatar_url: "https://avatars.githubusercontent.com/u/1".to_string(),
        }),
        files: Vec::new(),
    }
}

fn success() -> RunStatus {
    RunStatus {
        conclusion: "success".to_string(),
        elapsed_seconds: Some(42),
    }
}

#[test]
fn test_compact_card_document() {
    let body = compact::format(&sample_commit(), &sample_run(), &ActionInputs::default(), &success());
    let message = render_message(&body).unwrap();

    assert_eq!(message["type"], "message");
    let attachment = &message["attachments"][0];
    assert_eq!(
        attachment["contentType"],
        "application/vnd.microsoft.card.adaptive"
    );

    let content = &attachment["content"];
    assert_eq!(content["type"], "AdaptiveCard");
    assert_eq!(content["version"], "1.4");
    assert_eq!(content["msteams"]["width"], "full");
    assert!(content["backgroundImage"]["url"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));

    // a single header block, no containers, no actions
    let card_body = content["body"].as_array().unwrap();
    assert_eq!(card_body.len(), 1);
    assert_eq!(card_body[0]["type"], "TextBlock");
    assert!(card_body[0]["text"].as_str().unwrap().contains("`SUCCESS [42s]`"));
    assert!(content["actions"].as_array().unwrap().is_empty());
}

#[test]
fn test_cozy_card_document() {
    let body = cozy::format(&sample_commit(), &sample_run(), &ActionInputs::default(), &success());
    let message = render_message(&body).unwrap();
    let content = &message["attachments"][0]["content"];

    // no header text, one container with the activity columns and facts
    let card_body = content["body"].as_array().unwrap();
    assert_eq!(card_body.len(), 1);
    assert_eq!(card_body[0]["type"], "Container");

    let items = card_body[0]["items"].as_array().unwrap();
    assert_eq!(items[0]["type"], "ColumnSet");
    let columns = items[0]["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0]["width"], "auto");
    assert_eq!(columns[0]["items"][0]["type"], "Image");
    assert_eq!(columns[1]["width"], "stretch");

    let fact_set = items.iter().find(|i| i["type"] == "FactSet").unwrap();
    let titles: Vec<&str> = fact_set["facts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Commit message:"));

    // both default actions surface at the document level
    let actions = content["actions"].as_array().unwrap();
    assert_eq!(actions.len(), 2);
    assert!(actions.iter().all(|a| a["type"] == "Action.OpenUrl"));
}

#[test]
fn test_changelog_card_document() {
    let mut ranged = sample_commit();
    ranged.commit.message = "Fix bug\n\nDetailed explanation.".to_string();

    let body = changelog::format(
        &sample_commit(),
        &sample_run(),
        &ActionInputs::default(),
        &success(),
        std::slice::from_ref(&ranged),
    );
    let message = render_message(&body).unwrap();
    let content = &message["attachments"][0]["content"];
    let items = content["body"][0]["items"].as_array().unwrap();

    // no fact set; one separated entry container after the activity columns
    assert!(items.iter().all(|i| i["type"] != "FactSet"));
    let entry = items.iter().find(|i| i["type"] == "Container").unwrap();
    assert_eq!(entry["separator"], true);
    assert_eq!(
        entry["items"][0]["columns"][0]["items"][0]["text"],
        "a1b2c3d"
    );
    assert_eq!(
        entry["items"][0]["columns"][1]["items"][0]["text"],
        "Fix bug"
    );
    assert_eq!(entry["items"][1]["text"], "Detailed explanation.");
}

#[test]
fn test_payload_pretty_prints_with_two_space_indent() {
    let body = compact::format(&sample_commit(), &sample_run(), &ActionInputs::default(), &success());
    let message = render_message(&body).unwrap();
    let pretty = serde_json::to_string_pretty(&message).unwrap();

    assert!(pretty.starts_with("{\n  \""));
    assert!(pretty.contains("\n  \"attachments\": ["));
}
