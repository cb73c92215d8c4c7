use sortex::{should_display, PatternMatcher};

const NONE: &[&str] = &[];

#[test]
fn empty_sets_display_everything() {
    for path in ["a.txt", "deep/nested/file.rs", "/abs/path/x", r"C:\win\path.md", ""] {
        assert!(should_display(path, NONE, NONE), "{path:?}");
    }
}

#[test]
fn any_matching_exclude_hides_regardless_of_include() {
    let excludes = ["**/node_modules", "*.log"];
    for includes in [&[][..], &["**/*"][..], &["*.log"][..]] {
        assert!(!should_display("pkg/node_modules", includes, &excludes));
        assert!(!should_display("logs/today.log", includes, &excludes));
    }
}

#[test]
fn unmatched_include_hides() {
    assert!(!should_display("src/main.rs", &["**/*.md"], NONE));
    assert!(!should_display("file.txt", &["docs", "*.js"], NONE));
}

#[test]
fn include_and_exclude_conflict_excludes() {
    assert!(!should_display("docs/readme.md", &["**/*.md"], &["docs/*"]));
    assert!(should_display("docs/readme.md", &["**/*.md"], &["src/*"]));
}

#[test]
fn backslash_paths_match_forward_slash_patterns() {
    assert!(should_display(r"C:\a\b.txt", &["*/b.txt"], NONE));
    assert!(should_display(r"C:\path\to\src\file.js", &["src/*"], &["*.txt"]));
    assert!(!should_display(r"C:\path\to\node_modules\x.js", NONE, &["**/node_modules/**"]));
}

#[test]
fn double_star_matches_at_any_depth() {
    let m = PatternMatcher::new(NONE, &["**/node_modules"]);
    assert!(m.matches_exclude("node_modules"));
    assert!(m.matches_exclude("a/node_modules"));
    assert!(m.matches_exclude("a/b/c/node_modules"));
    assert!(!m.matches_exclude("a/node_modules_backup"));
}

#[test]
fn single_star_stays_within_one_level() {
    let m = PatternMatcher::new(&["src/*"], NONE);
    assert!(m.matches_include("src/main.rs"));
    assert!(m.matches_include("/path/to/src/component.js"));
    assert!(!m.matches_include("src/bin/tool.rs"));
}

#[test]
fn separator_free_patterns_match_the_base_name() {
    let m = PatternMatcher::new(&["*.spec.*"], &["*.txt"]);
    assert!(m.matches_include("/path/to/test.spec.js"));
    assert!(m.matches_include("test.spec.ts"));
    assert!(m.matches_exclude("/path/to/file.txt"));
    assert!(!m.matches_exclude("/path/to/file.js"));
}

#[test]
fn separator_free_patterns_match_any_segment() {
    assert!(!should_display("/path/to/node_modules/file.txt", NONE, &["node_modules"]));
    assert!(should_display("/path/to/src/file.txt", NONE, &["node_modules"]));

    assert!(should_display("/path/to/src/file.txt", &["src"], NONE));
    assert!(!should_display("/path/to/src/file.txt", &["docs"], NONE));
    assert!(should_display("/path/to/src/file.js", &["docs", "src"], &["*.txt"]));

    assert!(!should_display("/path/to/src/file.txt", &["src"], &["*.txt"]));
    assert!(!should_display("/path/to/src/file.txt", &["src"], &["node_modules", "*.txt"]));

    assert!(should_display("x.spec.d/file.txt", &["*.spec.*"], NONE));
}

#[test]
fn segment_matching_is_whole_segment() {
    let m = PatternMatcher::new(NONE, &["node_modules"]);
    assert!(m.matches_exclude("pkg/node_modules/index.js"));
    assert!(!m.matches_exclude("pkg/node_modules_backup/index.js"));
    assert!(!m.matches_exclude("pkg/my_node_modules/index.js"));
}

#[test]
fn brace_and_class_syntax() {
    let m = PatternMatcher::new(&["**/*.{md,txt}", "data/file[0-9].csv"], NONE);
    assert!(m.matches_include("notes/a.md"));
    assert!(m.matches_include("b.txt"));
    assert!(m.matches_include("data/file7.csv"));
    assert!(!m.matches_include("data/fileX.csv"));
    assert!(!m.matches_include("main.rs"));
}

#[test]
fn malformed_patterns_never_match() {
    // A broken exclude must not hide anything.
    assert!(should_display("a.md", NONE, &["[unclosed"]));
    assert!(should_display("a.md", NONE, &["{a,b"]));

    // Nor does an include list made only of broken patterns.
    assert!(should_display("a.md", &["[oops"], NONE));
    assert!(should_display("deep/b.rs", &["[oops", "{a,b"], NONE));
    assert!(!PatternMatcher::new(&["[oops"], NONE).has_includes());

    // Valid siblings keep working.
    let m = PatternMatcher::new(&["[oops", "*.md"], &["{x", "*.log"]);
    assert!(m.matches_include("a.md"));
    assert!(!m.matches_include("a.rs"));
    assert!(m.matches_exclude("a.log"));
    assert!(!m.matches_exclude("a.md"));
}

#[test]
fn matcher_reports_configured_sets() {
    let m = PatternMatcher::allow_all();
    assert!(!m.has_includes());
    assert!(!m.has_excludes());
    assert!(m.should_display("anything"));

    let m = PatternMatcher::new(&["*.md"], &["*.log"]);
    assert!(m.has_includes());
    assert!(m.has_excludes());
}
