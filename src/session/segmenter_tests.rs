// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn user_submission_appends_immediately() {
    let mut seg = Segmenter::new();
    let msg = seg.submit_user("hello".to_owned(), 1);
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content, "hello");
    assert_eq!(seg.messages().len(), 1);
}

#[test]
fn first_stable_text_opens_a_new_agent_tail() {
    let mut seg = Segmenter::new();
    let msg = seg.apply_stable_text("working...".to_owned(), 1);
    assert_eq!(msg.role, Role::Agent);
    assert_eq!(seg.messages().len(), 1);
}

#[test]
fn subsequent_stable_text_replaces_tail_content_with_same_id() {
    let mut seg = Segmenter::new();
    let first = seg.apply_stable_text("partial".to_owned(), 1);
    let second = seg.apply_stable_text("partial and more".to_owned(), 2);

    assert_eq!(first.id, second.id, "tail id must stay stable across updates");
    assert_eq!(second.content, "partial and more");
    assert_eq!(seg.messages().len(), 1, "still a single message, content replaced");
}

#[test]
fn user_submission_seals_open_agent_tail() {
    let mut seg = Segmenter::new();
    let agent_reply = seg.apply_stable_text("first reply".to_owned(), 1);
    seg.submit_user("next question".to_owned(), 2);
    let next_reply = seg.apply_stable_text("second reply".to_owned(), 3);

    assert_ne!(agent_reply.id, next_reply.id, "a new agent tail must open after sealing");

    let all = seg.messages();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].content, "first reply");
    assert_eq!(all[1].role, Role::User);
    assert_eq!(all[2].content, "second reply");
}

#[test]
fn messages_snapshot_includes_open_tail_at_the_end() {
    let mut seg = Segmenter::new();
    seg.submit_user("hi".to_owned(), 1);
    seg.apply_stable_text("reply in progress".to_owned(), 2);

    let all = seg.messages();
    assert_eq!(all.len(), 2);
    assert_eq!(all.last().unwrap().role, Role::Agent);
}

#[test]
fn empty_segmenter_has_no_messages() {
    let seg = Segmenter::new();
    assert!(seg.messages().is_empty());
}
