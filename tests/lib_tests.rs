use album::engine::{
    derive_sibling_path, glob_match, is_derived_path, is_image_path, resolve_opts, truncate_chars,
};
use album::engine::{Cli, ImageTools, ToolOutcome};
use album::enumerate::expand_patterns;
use album::manifest::{html_escape, render_html};
use album::operator::{Operator, ScriptedOperator, read_bounded_line};
use album::utils::{apply_file_to_opts, parse_album_toml};
use album::{GalleryEntry, Opts, Rotation};
use clap::Parser;
use std::io::Cursor;
use std::path::{Path, PathBuf};

// --- derive_sibling_path ---

#[test]
fn test_derive_simple_extension() {
    assert_eq!(derive_sibling_path("photo.jpg", "tn"), "photo_tn.jpg");
}

#[test]
fn test_derive_last_dot_wins() {
    assert_eq!(
        derive_sibling_path("archive.tar.gz", "tn"),
        "archive.tar_tn.gz"
    );
}

#[test]
fn test_derive_no_extension_has_no_trailing_dot() {
    assert_eq!(derive_sibling_path("noext", "tn"), "noext_tn");
}

#[test]
fn test_derive_dot_in_directory_only() {
    assert_eq!(derive_sibling_path("dir.v2/photo", "tn"), "dir.v2/photo_tn");
    assert_eq!(
        derive_sibling_path("dir.v2/photo.png", "tn"),
        "dir.v2/photo_tn.png"
    );
}

#[test]
fn test_derive_is_stable_across_calls() {
    let original = String::from("shots/IMG_0001.JPG");
    let a = derive_sibling_path(&original, "thumbnail");
    let b = derive_sibling_path(&original, "thumbnail");
    assert_eq!(a, b);
    assert_eq!(original, "shots/IMG_0001.JPG");
}

#[test]
fn test_derive_chained_tags() {
    let rotated = derive_sibling_path("a/b.jpg", "rotated");
    assert_eq!(derive_sibling_path(&rotated, "final"), "a/b_rotated_final.jpg");
}

// --- glob_match ---

#[test]
fn test_glob_match_literal() {
    assert!(glob_match("photo.jpg", "photo.jpg"));
    assert!(!glob_match("photo.jpg", "photo.jp"));
}

#[test]
fn test_glob_match_star() {
    assert!(glob_match("*.jpg", "a.jpg"));
    assert!(glob_match("*.jpg", ".jpg"));
    assert!(!glob_match("*.jpg", "a.jpg.txt"));
    assert!(glob_match("IMG_*", "IMG_0001.JPG"));
    assert!(glob_match("a*", "a"));
}

#[test]
fn test_glob_match_question_mark() {
    assert!(glob_match("img?.png", "img1.png"));
    assert!(!glob_match("img?.png", "img.png"));
}

// --- path filters ---

#[test]
fn test_is_image_path_case_insensitive() {
    assert!(is_image_path(Path::new("a/B.JPG")));
    assert!(is_image_path(Path::new("c.webp")));
    assert!(!is_image_path(Path::new("notes.txt")));
    assert!(!is_image_path(Path::new("noext")));
}

#[test]
fn test_is_derived_path() {
    assert!(is_derived_path(Path::new("a_thumbnail.jpg")));
    assert!(is_derived_path(Path::new("a_rotated_final.jpg")));
    assert!(!is_derived_path(Path::new("thumbnail.jpg")));
    assert!(!is_derived_path(Path::new("a.jpg")));
}

#[test]
fn test_truncate_chars_on_char_boundary() {
    let mut s = String::from("héllo wörld");
    assert!(truncate_chars(&mut s, 4));
    assert_eq!(s, "héll");

    let mut short = String::from("ok");
    assert!(!truncate_chars(&mut short, 5));
    assert_eq!(short, "ok");
}

// --- rotation ---

#[test]
fn test_rotation_answers_and_degrees() {
    assert_eq!(Rotation::from_answer("r"), Some(Rotation::Clockwise));
    assert_eq!(Rotation::from_answer(" L "), Some(Rotation::CounterClockwise));
    assert_eq!(Rotation::from_answer("x"), None);
    assert_eq!(Rotation::Clockwise.degrees(), 90);
    assert_eq!(Rotation::CounterClockwise.degrees(), -90);
}

// --- tool argument conventions ---

#[test]
fn test_resize_and_rotate_args() {
    assert_eq!(
        ImageTools::resize_args(10, "a.jpg", "a_thumbnail.jpg"),
        vec!["-resize", "10%", "a.jpg", "a_thumbnail.jpg"]
    );
    assert_eq!(
        ImageTools::rotate_args(-90, "a.jpg", "a_rotated.jpg"),
        vec!["-rotate", "-90", "a.jpg", "a_rotated.jpg"]
    );
}

#[test]
fn test_tool_outcome_describe() {
    assert!(ToolOutcome::Success.is_success());
    assert_eq!(
        ToolOutcome::Failed { code: Some(2) }.describe("convert"),
        "convert exited with status 2"
    );
    assert!(
        ToolOutcome::SpawnFailed("not found".into())
            .describe("convert")
            .starts_with("could not start convert")
    );
}

// --- operator input ---

#[test]
fn test_read_bounded_line_strips_newline() {
    let mut input = Cursor::new("hello\r\nnext\n");
    assert_eq!(read_bounded_line(&mut input, 100).unwrap(), "hello");
    assert_eq!(read_bounded_line(&mut input, 100).unwrap(), "next");
    assert_eq!(read_bounded_line(&mut input, 100).unwrap(), "");
}

#[test]
fn test_read_bounded_line_replaces_invalid_utf8() {
    let mut input = Cursor::new(b"caf\xe9\nok\n".to_vec());
    assert_eq!(read_bounded_line(&mut input, 100).unwrap(), "caf\u{FFFD}");
    assert_eq!(read_bounded_line(&mut input, 100).unwrap(), "ok");
}

#[test]
fn test_read_bounded_line_truncates_overflow() {
    let mut input = Cursor::new("abcdefghij\n");
    assert_eq!(read_bounded_line(&mut input, 4).unwrap(), "abcd");
}

#[test]
fn test_scripted_operator_runs_dry() {
    let mut op = ScriptedOperator::new(["one"]);
    assert_eq!(op.prompt("first", 10).unwrap(), "one");
    assert_eq!(op.prompt("second", 10).unwrap(), "");
    assert_eq!(op.asked(), ["first", "second"]);
}

// --- manifest rendering ---

#[test]
fn test_html_escape() {
    assert_eq!(
        html_escape(r#"<b>"Tom" & 'Jerry'</b>"#),
        "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );
}

#[test]
fn test_render_html_in_entry_order() {
    let entries = vec![
        GalleryEntry {
            original: "b.jpg".into(),
            thumbnail: "b_thumbnail.jpg".into(),
            final_path: "b_final.jpg".into(),
            caption: "second <one>".into(),
        },
        GalleryEntry {
            original: "a.jpg".into(),
            thumbnail: "a_thumbnail.jpg".into(),
            final_path: "a_final.jpg".into(),
            caption: "first".into(),
        },
    ];
    let html = render_html(&entries);
    let b = html.find(r#"<a href="b_final.jpg"><img src="b_thumbnail.jpg""#);
    let a = html.find(r#"<a href="a_final.jpg"><img src="a_thumbnail.jpg""#);
    assert!(b.is_some() && a.is_some());
    assert!(b < a);
    assert!(html.contains("second &lt;one&gt;"));
}

// --- enumeration ---

#[test]
fn test_expand_directory_sorted_images_only() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["c.jpg", "a.png", "b.txt", "a_thumbnail.png", "d.JPEG"] {
        std::fs::write(dir.path().join(name), b"x").unwrap();
    }
    let pattern = dir.path().to_string_lossy().into_owned();
    let got = expand_patterns(&[pattern]).unwrap();
    let names: Vec<_> = got
        .iter()
        .map(|p| Path::new(p).file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.png", "c.jpg", "d.JPEG"]);
}

#[test]
fn test_expand_glob_keeps_pattern_order_and_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["x1.jpg", "x2.jpg", "y1.png"] {
        std::fs::write(dir.path().join(name), b"x").unwrap();
    }
    let png = dir.path().join("*.png").to_string_lossy().into_owned();
    let jpg = dir.path().join("x?.jpg").to_string_lossy().into_owned();
    let got = expand_patterns(&[png.clone(), jpg, png]).unwrap();
    assert_eq!(
        got,
        ["y1.png", "x1.jpg", "x2.jpg", "y1.png"]
            .map(|n| dir.path().join(n).to_string_lossy().into_owned())
    );
}

#[cfg(unix)]
#[test]
fn test_expand_skips_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("good.jpg"), b"x").unwrap();
    std::fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.jpg")), b"x").unwrap();
    let pattern = dir.path().to_string_lossy().into_owned();
    let got = expand_patterns(&[pattern]).unwrap();
    assert_eq!(got, [dir.path().join("good.jpg").to_string_lossy().into_owned()]);
}

#[test]
fn test_expand_missing_file_matches_nothing() {
    let got = expand_patterns(&["/definitely/not/here.jpg".to_string()]).unwrap();
    assert!(got.is_empty());
}

// --- configuration ---

#[test]
fn test_file_then_cli_precedence() {
    let file = parse_album_toml(
        r#"
[settings]
thumbnail_percent = 15
final_percent = 50
resize_program = "magick"
output = "gallery.html"
"#,
    )
    .unwrap();
    let cli = Cli::parse_from(["album", "--final-percent", "30", "a.jpg", "-n"]);
    let opts = resolve_opts(&cli, Some(&file));
    assert_eq!(opts.thumbnail_percent, 15);
    assert_eq!(opts.final_percent, 30);
    assert_eq!(opts.resize_program, "magick");
    assert_eq!(opts.rotate_program, "convert");
    assert_eq!(opts.output, PathBuf::from("gallery.html"));
    assert!(opts.no_prompt);
    assert!(!opts.verbose);
}

#[test]
fn test_empty_summary_in_file_disables_it() {
    let file = parse_album_toml("[settings]\nsummary = \"\"\n").unwrap();
    let mut opts = Opts::default();
    assert!(opts.summary.is_some());
    apply_file_to_opts(&file, &mut opts);
    assert!(opts.summary.is_none());
}

#[test]
fn test_malformed_toml_is_an_error() {
    assert!(parse_album_toml("[settings]\nthumbnail_percent = \"big\"\n").is_err());
}
