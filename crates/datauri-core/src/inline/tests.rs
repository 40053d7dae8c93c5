use super::*;
use crate::host::memory::MemoryHost;

const CSS: &str = "/site/css/site.css";
const DEST: &str = "/site/dist";
const OUT: &str = "/site/dist/site.css";

fn png(len: usize) -> Vec<u8> {
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.resize(len, 0);
    bytes
}

fn options() -> InlineOptions {
    InlineOptions {
        target: vec!["/site/css/*".to_string(), "/site/css/images/*".to_string()],
        ..InlineOptions::default()
    }
}

fn process(host: &MemoryHost, opts: &InlineOptions) -> FileReport {
    let mut inliner = Inliner::new(host, opts);
    inliner.prepare(Path::new("/site")).unwrap();
    inliner
        .process_file(Path::new(CSS), Path::new(DEST))
        .unwrap()
}

#[test]
fn inlines_small_local_png() {
    let css = "a { background: url('icon.png') }";
    let host = MemoryHost::new()
        .with_file(CSS, css)
        .with_file("/site/css/icon.png", png(100));
    let report = process(&host, &options());

    let out = host.contents(OUT).unwrap();
    assert!(out.starts_with("a { background: url('data:image/png;base64,"));
    assert!(!out.contains("icon.png"));
    assert_eq!(report.references, 1);
    assert_eq!(report.candidates, 1);
    assert_eq!(
        report.inlined,
        vec![Inlined {
            uri: "icon.png".into(),
            path: PathBuf::from("/site/css/icon.png"),
            size: 100,
        }]
    );
    assert!(report.skipped.is_empty());
}

#[test]
fn every_occurrence_gets_the_same_encoding() {
    let css = "a{background:url(i.png)} b{background:url(\"i.png\")}";
    let host = MemoryHost::new()
        .with_file(CSS, css)
        .with_file("/site/css/i.png", png(20));
    let report = process(&host, &options());

    let expected = crate::encode::data_uri(&png(20), Path::new("i.png"));
    let out = host.contents(OUT).unwrap();
    assert_eq!(out.matches(expected.as_str()).count(), 2);
    assert!(!out.contains("i.png"));
    assert_eq!(report.references, 2);
    assert_eq!(report.candidates, 1);
}

#[test]
fn no_references_is_byte_for_byte_copy() {
    let css = "body { color: red; }\n/* nothing to see */\n";
    let host = MemoryHost::new().with_file(CSS, css);
    let report = process(&host, &options());
    assert_eq!(host.contents(OUT).as_deref(), Some(css));
    assert!(report.is_passthrough());
}

#[test]
fn remote_and_data_references_are_untouched() {
    let css = "a{background:url(http://example.com/a.png)} b{background:url(data:image/png;base64,AAAA)}";
    let host = MemoryHost::new().with_file(CSS, css);
    let report = process(&host, &options());
    assert_eq!(host.contents(OUT).as_deref(), Some(css));
    assert_eq!(report.references, 2);
    assert_eq!(report.candidates, 0);
}

#[test]
fn unaccepted_extension_is_untouched() {
    let css = "@font-face{src:url(font.woff)}";
    let host = MemoryHost::new()
        .with_file(CSS, css)
        .with_file("/site/css/font.woff", vec![1u8; 10]);
    let report = process(&host, &options());
    assert_eq!(host.contents(OUT).as_deref(), Some(css));
    assert_eq!(report.candidates, 0);
}

#[test]
fn oversized_root_relative_image_is_skipped_with_sizes() {
    let css = "a{background:url(/images/big.png)}";
    let host = MemoryHost::new()
        .with_file(CSS, css)
        .with_file("/site/css/images/big.png", png(5000));
    let report = process(&host, &options());

    assert_eq!(host.contents(OUT).as_deref(), Some(css));
    assert!(report.inlined.is_empty());
    assert_eq!(report.skipped.len(), 1);
    let reason = &report.skipped[0].reason;
    assert_eq!(
        reason,
        &SkipReason::TooLarge {
            path: PathBuf::from("/site/css/images/big.png"),
            size: 5000,
            max_bytes: 2048,
        }
    );
    let message = reason.to_string();
    assert!(message.contains("5000") && message.contains("2048"));
}

#[test]
fn exactly_max_bytes_is_inlined() {
    let css = "a{background:url(edge.png)}";
    let host = MemoryHost::new()
        .with_file(CSS, css)
        .with_file("/site/css/edge.png", png(2048));
    let report = process(&host, &options());
    assert_eq!(report.inlined.len(), 1);
}

#[test]
fn missing_and_empty_files_are_skipped() {
    let css = "a{background:url(gone.png)} b{background:url(blank.gif)}";
    let host = MemoryHost::new()
        .with_file(CSS, css)
        .with_file("/site/css/blank.gif", Vec::new());
    let report = process(&host, &options());

    assert_eq!(host.contents(OUT).as_deref(), Some(css));
    assert!(matches!(
        report.skipped[0].reason,
        SkipReason::NotFound { .. }
    ));
    assert!(matches!(report.skipped[1].reason, SkipReason::Empty { .. }));
}

#[test]
fn unreadable_image_is_skipped_not_fatal() {
    let css = "a{background:url(locked.png)} b{background:url(ok.png)}";
    let host = MemoryHost::new()
        .with_file(CSS, css)
        .with_file("/site/css/locked.png", png(40))
        .with_unreadable("/site/css/locked.png")
        .with_file("/site/css/ok.png", png(40));
    let report = process(&host, &options());

    assert_eq!(report.inlined.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].uri, "locked.png");
    match &report.skipped[0].reason {
        SkipReason::Unreadable { path, error } => {
            assert_eq!(path, &PathBuf::from("/site/css/locked.png"));
            assert!(error.contains("permission denied"));
        }
        other => panic!("expected Unreadable, got {other:?}"),
    }
    let out = host.contents(OUT).unwrap();
    assert!(out.contains("url(locked.png)"));
    assert!(!out.contains("ok.png"));
}

#[test]
fn shorter_uri_is_also_replaced_inside_longer_reference() {
    // `a.png` is inlined first; its text inside `img/a.png` is replaced too,
    // so the longer reference is no longer a resolvable path afterwards.
    let css = "a{background:url(a.png)} b{background:url(img/a.png)}";
    let host = MemoryHost::new()
        .with_file(CSS, css)
        .with_file("/site/css/a.png", "GIF89a")
        .with_file("/site/css/img/a.png", png(40));
    let report = process(&host, &options());

    let encoded = crate::encode::data_uri(b"GIF89a", Path::new("a.png"));
    let out = host.contents(OUT).unwrap();
    assert_eq!(
        out,
        format!("a{{background:url({encoded})}} b{{background:url(img/{encoded})}}")
    );
    assert_eq!(report.candidates, 2);
    assert_eq!(report.inlined.len(), 2);
}

#[test]
fn empty_extension_list_passes_everything_through() {
    let css = "a{background:url(icon.png)}";
    let host = MemoryHost::new()
        .with_file(CSS, css)
        .with_file("/site/css/icon.png", png(10));
    let opts = InlineOptions {
        image_extensions: Vec::new(),
        ..options()
    };
    let report = process(&host, &opts);
    assert_eq!(host.contents(OUT).as_deref(), Some(css));
    assert_eq!(report.candidates, 0);
}

#[test]
fn extension_regex_override() {
    let css = "a{background:url(logo.svg)} b{background:url(icon.png)}";
    let host = MemoryHost::new()
        .with_file(CSS, css)
        .with_file("/site/css/logo.svg", "<svg xmlns=\"http://www.w3.org/2000/svg\"/>")
        .with_file("/site/css/icon.png", png(10));
    let opts = InlineOptions {
        extension_regex: Some(Regex::new(r"\.svg$").unwrap()),
        ..options()
    };
    let report = process(&host, &opts);
    let out = host.contents(OUT).unwrap();
    assert!(out.contains("data:image/svg+xml;base64,"));
    assert!(out.contains("url(icon.png)"));
    assert_eq!(report.inlined.len(), 1);
}

#[test]
fn unknown_image_is_relevelled_for_destination() {
    // Source lives two levels below the destination; the target set is empty,
    // so the reference is re-leveled instead of taken as-is.
    let src = "/site/css/themes/dark.css";
    let css = "a{background:url(../../img/a.png)}";
    let host = MemoryHost::new()
        .with_file(src, css)
        .with_file("/site/css/themes/img/a.png", png(30));
    let opts = InlineOptions::default();
    let inliner = Inliner::new(&host, &opts);
    let report = inliner
        .process_file(Path::new(src), Path::new("/site"))
        .unwrap();

    assert_eq!(report.inlined.len(), 1);
    assert_eq!(
        report.inlined[0].path,
        PathBuf::from("/site/css/themes/img/a.png")
    );
    assert!(host.contents("/site/dark.css").unwrap().contains("data:image/png"));
}

#[test]
fn base_dir_override_changes_resolution_root() {
    let css = "a{background:url(img/a.png)}";
    let host = MemoryHost::new()
        .with_file(CSS, css)
        .with_file("/site/img/a.png", png(30));
    let opts = InlineOptions {
        base_dir: Some(PathBuf::from("/site")),
        target: vec!["/site/img/*".to_string()],
        ..InlineOptions::default()
    };
    let report = process(&host, &opts);
    assert_eq!(report.inlined[0].path, PathBuf::from("/site/img/a.png"));
}

#[test]
fn write_failure_is_fatal() {
    let host = MemoryHost::new()
        .with_file(CSS, "a{}")
        .with_read_only(OUT);
    let opts = options();
    let inliner = Inliner::new(&host, &opts);
    let err = inliner
        .process_file(Path::new(CSS), Path::new(DEST))
        .unwrap_err();
    assert!(err.to_string().contains("read-only"));
}

#[test]
fn run_stops_at_first_unreadable_source() {
    let host = MemoryHost::new().with_file("/site/css/b.css", "b{}");
    let opts = options();
    let inliner = Inliner::new(&host, &opts);
    let sources = vec![
        PathBuf::from("/site/css/a.css"),
        PathBuf::from("/site/css/b.css"),
    ];
    assert!(inliner.run("t", &sources, Path::new(DEST)).is_err());
    assert!(host.contents("/site/dist/b.css").is_none());
}

#[test]
fn run_task_expands_sources_in_order() {
    let host = MemoryHost::new()
        .with_file("/site/css/a.css", "a{background:url(../img/x.gif)}")
        .with_file("/site/css/b.css", "b{}")
        .with_file("/site/img/x.gif", "GIF89a");
    let task = ResolvedTask {
        name: "styles".into(),
        root: PathBuf::from("/site"),
        src: vec!["css/*".into()],
        dest: PathBuf::from("/site/out"),
        options: InlineOptions {
            target: vec!["img/*".into()],
            ..InlineOptions::default()
        },
    };
    let report = run_task(&host, &task).unwrap();

    assert_eq!(report.task, "styles");
    assert_eq!(report.image_files, 1);
    let outputs: Vec<_> = report.files.iter().map(|f| f.output.clone()).collect();
    assert_eq!(
        outputs,
        vec![PathBuf::from("/site/out/a.css"), PathBuf::from("/site/out/b.css")]
    );
    assert_eq!(report.inlined_count(), 1);
    assert_eq!(report.skipped_count(), 0);
    assert_eq!(
        host.contents("/site/out/a.css").as_deref(),
        Some("a{background:url(data:image/gif;base64,R0lGODlh)}")
    );
}
