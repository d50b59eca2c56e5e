use std::fs;
use std::path::Path;

use mail_threader::loader::load_messages;
use mail_threader::render::{render_json, render_text};
use mail_threader::{Threader, ThreadingConfig};

fn write_message(dir: &Path, name: &str, headers: &[(&str, &str)]) {
    let mut raw = String::new();
    for (name, value) in headers {
        raw.push_str(&format!("{name}: {value}\r\n"));
    }
    raw.push_str("\r\nBody\r\n");
    fs::write(dir.join(name), raw).unwrap();
}

fn mailbox() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let cur = dir.path().join("cur");
    fs::create_dir(&cur).unwrap();

    write_message(
        &cur,
        "01",
        &[
            ("Message-ID", "<root@list>"),
            ("Subject", "[PATCH] Fix leak"),
            ("From", "Alice <alice@example.com>"),
            ("Date", "Mon, 30 Jun 2025 09:00:00 +0000"),
        ],
    );
    write_message(
        &cur,
        "02",
        &[
            ("Message-ID", "<reply@list>"),
            ("In-Reply-To", "<root@list>"),
            ("Subject", "Re: [PATCH] Fix leak"),
        ],
    );
    write_message(
        &cur,
        "03",
        &[
            ("Message-ID", "<nested@list>"),
            ("References", "<root@list> <reply@list>"),
            ("Subject", "Re: [PATCH] Fix leak"),
        ],
    );
    // Lost its References, found again through the subject
    write_message(
        &cur,
        "04",
        &[
            ("Message-ID", "<stray@list>"),
            ("Subject", "RE: Fix leak"),
        ],
    );
    write_message(
        &cur,
        "05",
        &[("Message-ID", "<other@list>"), ("Subject", "Unrelated")],
    );
    fs::write(cur.join("06"), "Subject: no id\r\n\r\n").unwrap();

    dir
}

#[test]
fn threads_a_maildir() {
    let dir = mailbox();
    let loaded = load_messages(&[dir.path().to_path_buf()]);
    assert_eq!(loaded.messages.len(), 5);
    assert_eq!(loaded.errors.len(), 1);

    let head = Threader::new(ThreadingConfig::standard()).thread(loaded.messages);

    assert_eq!(
        render_text(head.as_ref()),
        concat!(
            "[PATCH] Fix leak <root@list>\n",
            "  RE: Fix leak <stray@list>\n",
            "  Re: [PATCH] Fix leak <reply@list>\n",
            "    Re: [PATCH] Fix leak <nested@list>\n",
            "Unrelated <other@list>\n",
        )
    );
}

#[test]
fn json_output_lists_every_message_with_its_parent() {
    let dir = mailbox();
    let loaded = load_messages(&[dir.path().to_path_buf()]);
    let head = Threader::new(ThreadingConfig::standard()).thread(loaded.messages);

    let json: serde_json::Value =
        serde_json::from_str(&render_json(head.as_ref()).unwrap()).unwrap();
    let nodes = json.as_array().unwrap();

    let ids: Vec<&str> = nodes
        .iter()
        .map(|node| node["message_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["root@list", "stray@list", "reply@list", "nested@list", "other@list"]
    );

    assert_eq!(nodes[0]["from"], "Alice <alice@example.com>");
    assert_eq!(nodes[0]["parent_id"], serde_json::Value::Null);
    assert_eq!(nodes[1]["parent_id"], "root@list");
    assert_eq!(nodes[3]["parent_id"], "reply@list");
    assert_eq!(nodes[3]["depth"], 2);
    assert_eq!(nodes[4]["parent_id"], serde_json::Value::Null);
}
