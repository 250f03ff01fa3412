//! Behavior every `Storage` backend must share.

use notizia_store::{Database, Error, MemoryStore, Storage};
use notizia_types::{
    CasePatch, CaseStatus, Gender, Method, NewCase, NewClient, NewSession, ProblemCategory,
    SessionPatch,
};

fn backends() -> Vec<(&'static str, Box<dyn Storage>)> {
    vec![
        ("memory", Box::new(MemoryStore::new())),
        ("sqlite", Box::new(Database::open_in_memory().unwrap())),
    ]
}

fn new_case(client_id: i64, started_at: &str) -> NewCase {
    NewCase {
        client_id,
        problem_category: ProblemCategory::Panic,
        problem_text: "Panikattacken".to_string(),
        started_at: started_at.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_client_crud_and_validation() {
    for (name, mut store) in backends() {
        let anna = store
            .add_client(NewClient::new("  Anna  ").gender(Gender::W).age(34))
            .unwrap();
        assert_eq!(anna.name, "Anna", "{name}");
        let ben = store.add_client(NewClient::new("Ben")).unwrap();

        let ids: Vec<i64> = store.list_clients().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![ben.id, anna.id], "{name}: newest first");

        let err = store.add_client(NewClient::new("A")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{name}");

        let updated = store
            .update_client(ben.id, NewClient::new("Benjamin").gender(Gender::M))
            .unwrap();
        assert_eq!(updated.name, "Benjamin", "{name}");
        assert_eq!(updated.gender, Some(Gender::M), "{name}");

        let err = store.update_client(999, NewClient::new("Nobody")).unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "client", id: 999 }), "{name}");
    }
}

#[test]
fn test_case_defaults_and_ordering() {
    for (name, mut store) in backends() {
        let client = store.add_client(NewClient::new("Anna")).unwrap();
        let older = store.add_case(new_case(client.id, "2024-03-01")).unwrap();
        let newer = store.add_case(new_case(client.id, "2025-01-01")).unwrap();
        let same_day = store.add_case(new_case(client.id, "2025-01-01")).unwrap();

        assert_eq!(older.status, CaseStatus::Open, "{name}");

        let ids: Vec<i64> = store
            .list_cases(client.id)
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![same_day.id, newer.id, older.id], "{name}");

        let closed = store
            .update_case(CasePatch::status(older.id, CaseStatus::Resolved))
            .unwrap();
        assert!(closed.is_closed(), "{name}");
        assert_eq!(closed.problem_text, "Panikattacken", "{name}");

        let err = store.add_case(new_case(999, "2025-01-01")).unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "client", .. }), "{name}");
    }
}

#[test]
fn test_session_patch_and_ordering() {
    for (name, mut store) in backends() {
        let client = store.add_client(NewClient::new("Anna")).unwrap();
        let case = store.add_case(new_case(client.id, "2025-01-01")).unwrap();

        let first = store
            .add_session(NewSession::new(case.id, "2025-01-02T10:00:00Z", Method::Coaching))
            .unwrap();
        let second = store
            .add_session(NewSession::new(
                case.id,
                "2025-01-09T10:00:00Z",
                Method::KlassischeHypnose,
            ))
            .unwrap();

        let ids: Vec<i64> = store
            .list_sessions(case.id)
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id], "{name}");

        let patched = store
            .update_session(
                first.id,
                SessionPatch {
                    sud_before: Some(8),
                    sud_after: Some(3),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(patched.sud_delta(), Some(5), "{name}");
        assert_eq!(patched.method, Method::Coaching, "{name}");

        let err = store
            .add_session(NewSession::new(999, "2025-01-01", Method::Other))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "case", .. }), "{name}");

        let err = store.delete_session(999).unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "session", .. }), "{name}");
    }
}

#[test]
fn test_deletes_cascade() {
    for (name, mut store) in backends() {
        let anna = store.add_client(NewClient::new("Anna")).unwrap();
        let ben = store.add_client(NewClient::new("Ben")).unwrap();
        let anna_case = store.add_case(new_case(anna.id, "2025-01-01")).unwrap();
        let ben_case = store.add_case(new_case(ben.id, "2025-01-01")).unwrap();
        let second_ben_case = store.add_case(new_case(ben.id, "2025-02-01")).unwrap();

        for case_id in [anna_case.id, ben_case.id, second_ben_case.id] {
            store
                .add_session(NewSession::new(case_id, "2025-02-01", Method::Coaching))
                .unwrap();
        }
        assert_eq!(store.list_all_sessions_expanded().unwrap().len(), 3, "{name}");

        store.delete_case(second_ben_case.id).unwrap();
        assert!(store.get_case(second_ben_case.id).unwrap().is_none(), "{name}");
        assert_eq!(store.list_all_sessions_expanded().unwrap().len(), 2, "{name}");

        store.delete_client(anna.id).unwrap();
        assert!(store.get_case(anna_case.id).unwrap().is_none(), "{name}");

        let rows = store.list_all_sessions_expanded().unwrap();
        assert_eq!(rows.len(), 1, "{name}");
        assert_eq!(rows[0].client.id, ben.id, "{name}");

        let err = store.delete_client(anna.id).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }), "{name}");
    }
}

#[test]
fn test_expanded_rows_are_consistent_and_newest_first() {
    for (name, mut store) in backends() {
        let client = store
            .add_client(NewClient::new("Anna").gender(Gender::W))
            .unwrap();
        let case = store.add_case(new_case(client.id, "2025-01-01")).unwrap();
        for started_at in ["2025-01-05", "2025-03-01", "2025-02-10"] {
            store
                .add_session(NewSession::new(case.id, started_at, Method::Coaching))
                .unwrap();
        }

        let rows = store.list_all_sessions_expanded().unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.session.started_at.as_str()).collect();
        assert_eq!(dates, vec!["2025-03-01", "2025-02-10", "2025-01-05"], "{name}");

        for row in &rows {
            assert_eq!(row.case.id, row.session.case_id, "{name}");
            assert_eq!(row.client.id, row.case.client_id, "{name}");
            assert_eq!(row.client.gender, Some(Gender::W), "{name}");
        }
    }
}

#[test]
fn test_newest_first_compares_instants_across_offsets() {
    for (name, mut store) in backends() {
        let client = store.add_client(NewClient::new("Anna")).unwrap();
        let case = store.add_case(new_case(client.id, "2025-01-01")).unwrap();
        for started_at in [
            "2025-01-07T01:00:00Z",
            "not a date",
            "2025-01-06T23:00:00-05:00",
            "2025-01-07",
        ] {
            store
                .add_session(NewSession::new(case.id, started_at, Method::Coaching))
                .unwrap();
        }

        let expected = vec![
            "2025-01-06T23:00:00-05:00",
            "2025-01-07T01:00:00Z",
            "2025-01-07",
            "not a date",
        ];

        let rows = store.list_all_sessions_expanded().unwrap();
        let order: Vec<&str> = rows.iter().map(|r| r.session.started_at.as_str()).collect();
        assert_eq!(order, expected, "{name}");

        let sessions = store.list_sessions(case.id).unwrap();
        let order: Vec<&str> = sessions.iter().map(|s| s.started_at.as_str()).collect();
        assert_eq!(order, expected, "{name}");
    }
}
