use super::*;
use crate::{DirectiveLine, Record};

fn loaded(source: &str) -> Tester {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut tester = Tester::default();
    tester.set_source(source, None).unwrap();
    tester
}

fn assert_paths(tester: &Tester, cases: &[(&str, bool)]) {
    for (path, expected) in cases {
        assert_eq!(tester.is_allowed(path).unwrap(), *expected, "{path}");
    }
}

#[test]
fn response_code_policy() {
    let cases: Vec<(u16, bool, bool)> = vec![
        // (code, allowed, allowed when ignoring forbidden)
        (200, true, true),
        (204, true, true),
        (303, false, false),
        (401, false, true),
        (403, false, true),
        (404, true, true),
        (410, true, true),
        (500, false, false),
        (503, false, false),
    ];
    let strict = Tester::default();
    let lenient = Tester::new(&Options { ignore_forbidden: true, ..Options::default() });
    for (code, allowed, allowed_lenient) in cases {
        assert_eq!(strict.is_response_code_allowed(code), allowed, "{code}");
        assert_eq!(lenient.is_response_code_allowed(code), allowed_lenient, "{code} ignoring forbidden");
    }
}

#[test]
fn response_code_replaces_source() {
    let mut tester = Tester::default();
    tester.set_response_code(503);
    assert!(!tester.is_allowed("/").unwrap());

    tester.set_source("User-agent: *\nDisallow: ", None).unwrap();
    assert!(tester.is_allowed("/").unwrap());

    tester.set_response_code(503);
    assert!(!tester.is_allowed("/").unwrap());

    tester.set_response_code(404);
    assert!(tester.is_allowed("/private").unwrap());
}

#[test]
fn response_body_is_parsed_only_on_success() {
    let body = "User-agent: *\nDisallow: /private";
    let mut tester = Tester::default();

    tester.set_response(200, body);
    assert!(!tester.is_allowed("/private").unwrap());
    assert!(tester.is_allowed("/public").unwrap());

    tester.set_response(404, body);
    assert!(tester.is_allowed("/private").unwrap());

    tester.set_response(500, body);
    assert!(!tester.is_allowed("/public").unwrap());
}

#[test]
fn longer_rules_take_priority() {
    let tester = loaded("User-agent: *\nDisallow: /foo\nDisallow: /foo/bar/baz");
    assert_paths(&tester, &[("/foo/bar/", false), ("/foo/bar/bazqux", false), ("/qux/foo/bar/baz", true)]);

    let tester = loaded("User-agent: *\nDisallow: /foo\nDisallow: /foo/bar/baz\nAllow: /foo/bar/");
    assert_paths(
        &tester,
        &[("/foo/bar/", true), ("/foo/bar/bazqux", false), ("/foo/b", false), ("/qux/foo/bar/baz", true)],
    );
}

#[test]
fn wildcard_with_end_anchor() {
    let tester = loaded("User-agent: *\nDisallow: /*.php$");
    assert_paths(
        &tester,
        &[
            ("/foo.php", false),
            ("/foo/bar.php", false),
            ("/foo.html", true),
            ("/foo.php/bar", true),
            ("/foo.php?bar", true),
        ],
    );
}

#[test]
fn escaped_wildcard_is_a_wildcard_by_default() {
    let source = "User-agent: *\nDisallow: /%2A.php";
    let tester = loaded(source);
    assert_eq!(tester.record_set().unwrap().value("Disallow"), Some("/*.php"));
    assert!(!tester.is_allowed("/x.php").unwrap());

    let mut literal = Tester::new(&Options { escaped_wildcard: false, ..Options::default() });
    literal.set_source(source, None).unwrap();
    assert!(literal.is_allowed("/x.php").unwrap());
    assert!(!literal.is_allowed("/%2A.php").unwrap());
}

#[test]
fn respect_order_keeps_declaration_order() {
    let options = Options { respect_order: true, ..Options::default() };
    let mut tester = Tester::new(&options);
    tester.set_source("User-agent: *\nDisallow: /foo\nAllow: /foo/bar/", None).unwrap();
    assert!(!tester.is_allowed("/foo/bar/").unwrap());

    tester.set_source("User-agent: *\nAllow: /foo/bar/\nDisallow: /foo", None).unwrap();
    assert!(tester.is_allowed("/foo/bar/").unwrap());
}

#[test]
fn set_source_filters_records() {
    let source = "User-agent: *\nDisallow: /\nUser-agent: Permitted\nDisallow:\nUser-agent: Forbidden\nDisallow: /path";
    let mut tester = Tester::default();
    let mut filter = Filter::default();

    filter.set_user_agents(["Unknown"], true);
    tester.set_source(filter.record_set(source), None).unwrap();
    assert!(!tester.is_allowed("/path").unwrap());
    assert!(!tester.is_allowed_for("/", &["Permitted"]).unwrap(), "filtered out before loading");

    filter.set_user_agents(["Permitted"], true);
    tester.set_source(filter.record_set(source), None).unwrap();
    assert!(tester.is_allowed("/path").unwrap());
    assert!(!tester.is_allowed_for("/path", &["Forbidden"]).unwrap());
    assert!(!tester.is_allowed_for("/", &["Forbidden"]).unwrap(), "filtered out before loading");

    filter.clear_user_agents();
    tester.set_source(filter.record_set(source), None).unwrap();
    assert!(!tester.is_allowed("/path").unwrap());

    filter.set_user_agents(["Forbidden"], true);
    tester.set_source(filter.record_set(source), None).unwrap();
    assert!(!tester.is_allowed("/path").unwrap());
    assert!(!tester.is_allowed_for("/path", &["Permitted"]).unwrap());
    assert!(!tester.is_allowed_for("/", &["Permitted"]).unwrap());

    filter.set_user_agents(["Permitted", "Forbidden"], true);
    tester.set_source(filter.record_set(source), None).unwrap();
    let cases: Vec<(&str, Option<&str>, bool)> = vec![
        ("/path", None, true),
        ("/path", Some("Permitted"), true),
        ("/path", Some("Forbidden"), false),
        ("/path", Some("Unknown"), false),
        ("/", None, true),
        ("/", Some("Permitted"), true),
        ("/", Some("Forbidden"), true),
        ("/", Some("Unknown"), false),
    ];
    for (path, agent, expected) in cases {
        let allowed = match agent {
            Some(agent) => tester.is_allowed_for(path, &[agent]).unwrap(),
            None => tester.is_allowed(path).unwrap(),
        };
        assert_eq!(allowed, expected, "{path} {agent:?}");
    }
}

#[test]
fn text_source_with_agents() {
    let source = "User-agent: *\nDisallow: /\n\nUser-agent: foo\nDisallow: /foo-only";
    let mut tester = Tester::default();
    tester.set_source(source, Some(&["Foo"])).unwrap();
    assert!(tester.is_allowed("/").unwrap());
    assert!(!tester.is_allowed("/foo-only").unwrap());
    assert_eq!(tester.record_set().map(RecordSet::len), Some(2));
}

#[test]
fn explicit_agents_leave_cache_alone() {
    let source = "User-agent: *\nDisallow: /\n\nUser-agent: bot\nDisallow: /bot-only";
    let tester = loaded(source);
    assert!(!tester.is_allowed("/page").unwrap());
    assert!(tester.is_allowed_for("/page", &["bot"]).unwrap());
    assert!(!tester.is_allowed("/page").unwrap());
}

#[test]
fn agents_with_record_set_is_rejected() {
    let mut tester = Tester::default();
    tester.set_source("User-agent: *\nDisallow: /", Some(&["Foo"])).unwrap();
    assert!(!tester.is_allowed("/foo").unwrap());

    let err = tester.set_source(RecordSet::new(), Some(&["Foo"])).unwrap_err();
    assert!(matches!(err, Error::AgentsWithRecordSet));
    assert!(!tester.is_allowed("/foo").unwrap(), "failed load keeps the previous source");
}

#[test]
fn path_must_begin_with_slash() {
    let tester = loaded("User-agent: *\nDisallow:");
    assert!(matches!(tester.is_allowed("foo"), Err(Error::InvalidPath(_))));
    assert!(matches!(tester.is_allowed(""), Err(Error::InvalidPath(_))));
    assert!(matches!(tester.is_allowed_for("foo", &["bot"]), Err(Error::InvalidPath(_))));
}

#[test]
fn queries_need_a_source() {
    let tester = Tester::default();
    assert!(matches!(tester.is_allowed("/foo"), Err(Error::NoSource)));
    assert!(matches!(tester.is_allowed_for("/foo", &["bot"]), Err(Error::NoSource)));
}

#[test]
fn path_is_checked_before_source() {
    let tester = Tester::default();
    assert!(matches!(tester.is_allowed("foo"), Err(Error::InvalidPath(_))));
    assert!(matches!(tester.is_allowed_for("", &["bot"]), Err(Error::InvalidPath(_))));
}

#[test]
fn unknown_directive_is_not_a_rule() {
    let mut set = RecordSet::new();
    set.add("*", Record::from_lines(vec![DirectiveLine::new("Foo", "/")]));
    let mut tester = Tester::default();
    tester.set_source(set, None).unwrap();
    assert!(tester.is_allowed("/").unwrap());
}

#[test]
fn empty_document_allows_everything() {
    let tester = loaded("");
    let set = tester.record_set().unwrap();
    assert!(set.record().is_empty());
    assert!(set.record_for(["any"]).is_empty());
    assert_paths(&tester, &[("/", true), ("/any/path", true), ("/%00", true)]);
}

#[test]
fn registered_directive_stays_in_group() {
    let mut classifier = Classifier::new();
    classifier.register_group_directive("Noindex");
    let mut tester = Tester::default().with_classifier(classifier);
    tester.set_source("User-agent: *\nNoindex: /drafts\nDisallow: /tmp", None).unwrap();

    let set = tester.record_set().unwrap();
    assert_eq!(set.value("Noindex"), Some("/drafts"));
    assert!(set.non_group_record().is_empty());
    assert!(tester.is_allowed("/drafts").unwrap());
    assert!(!tester.is_allowed("/tmp").unwrap());
}
