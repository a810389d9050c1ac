// crates/uiqvga-cli/tests/scramble_search.rs

use std::path::Path;
use std::process::{Command, Output};

use uiqvga_core::canvas::Canvas;
use uiqvga_core::color::render_canvas;
use uiqvga_core::{ChannelOrder, Geometry, ParameterSet, TileOrder, XorKeys, XorMode};

fn run_ok(cmd: &mut Command) -> Output {
    let out = cmd.output().expect("spawn command");
    assert!(
        out.status.success(),
        "command failed: status={:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    out
}

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_uiqvga"))
}

fn truth() -> ParameterSet {
    ParameterSet {
        tile_order: TileOrder::ColumnMajor,
        xor_mode: XorMode::Constant,
        xor_keys: XorKeys::new(0xAAAA, 0x5555),
        channel_order: ChannelOrder::Bgr,
        column_offsets: vec![1, 0, -1],
        ..ParameterSet::plain(3)
    }
}

/// 12x12 ramp written through the same channel order the dump will use.
fn write_ramp_png(path: &Path) {
    let g = Geometry::new(4, 3).unwrap();
    let canvas = Canvas::from_fn(g, |r, c| (((c & 31) as u16) << 11) | (((r & 63) as u16) << 5));
    let img = render_canvas(&canvas, false, ChannelOrder::Bgr);
    image::RgbImage::from_raw(12, 12, img.into_bytes())
        .unwrap()
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn scramble_then_search_recovers_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("ramp.png");
    let dump = dir.path().join("ramp.raw");
    let out = dir.path().join("ranked");
    write_ramp_png(&png);

    let tag = truth().to_string();
    run_ok(bin().args(["scramble", "--in", s(&png), "--out", s(&dump), "--tile", "4", "--grid", "3", "--tag", &tag]));
    assert_eq!(std::fs::metadata(&dump).unwrap().len(), 12 * 12 * 2);

    let res = run_ok(bin().args([
        "search", "--in", s(&dump), "--out", s(&out), "--tile", "4", "--grid", "3",
        "--orders", "col", "--xor-modes", "const", "--key", "aaaa", "--key2", "5555",
        "--swaps", "0", "--channels", "bgr", "--parities", "odd",
        "--shifts", "0,2", "--steps", "0", "--periods", "0", "--offsets", "-1:1",
        "--top", "3", "--threads", "2",
    ]));

    let stdout = String::from_utf8_lossy(&res.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "stdout:\n{stdout}");
    assert!(lines[0].starts_with("01  "), "{}", lines[0]);
    assert!(lines[0].ends_with(&tag), "rank 1 was {}", lines[0]);

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("ranking.json")).unwrap()).unwrap();
    assert_eq!(manifest["evaluated"], 54);
    let first = &manifest["candidates"][0];
    assert_eq!(first["tag"], tag.as_str());
    assert_eq!(first["param_id"], truth().id_hex().as_str());
    assert!(Path::new(first["png"].as_str().unwrap()).exists());

    // The .uqp written for rank 1 renders the original image back.
    let uqp = first["params_file"].as_str().unwrap().to_string();
    let inspected = run_ok(bin().args(["inspect", "--params", &uqp]));
    let text = String::from_utf8_lossy(&inspected.stdout);
    assert!(text.contains("checksums=ok"));
    assert!(text.contains(&format!("tag={tag}")));

    let rendered = dir.path().join("back.png");
    run_ok(bin().args([
        "render", "--in", s(&dump), "--out", s(&rendered), "--tile", "4", "--grid", "3", "--params", &uqp,
    ]));
    let a = image::open(&png).unwrap().to_rgb8();
    let b = image::open(&rendered).unwrap().to_rgb8();
    assert_eq!(a.into_raw(), b.into_raw());
}

#[test]
fn render_scores_with_the_same_weights_as_search() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("ramp.png");
    let dump = dir.path().join("ramp.raw");
    write_ramp_png(&png);
    let tag = truth().to_string();
    run_ok(bin().args(["scramble", "--in", s(&png), "--out", s(&dump), "--tile", "4", "--grid", "3", "--tag", &tag]));

    let weights = ["--w-seam", "1.0", "--w-comb", "3.0", "--w-edge", "0.25"];
    let res = run_ok(
        bin()
            .args([
                "search", "--in", s(&dump), "--out", s(&dir.path().join("ranked")), "--tile", "4", "--grid", "3",
                "--orders", "col", "--key", "aaaa", "--key2", "5555", "--channels", "bgr",
                "--shifts", "0,1", "--steps", "0", "--periods", "0", "--offsets", "-1:1", "--top", "1",
            ])
            .args(weights),
    );
    let stdout = String::from_utf8_lossy(&res.stdout);
    let mut cols = stdout.lines().next().unwrap().split_whitespace();
    let _rank = cols.next().unwrap();
    let search_score = cols.next().unwrap().to_string();
    let best_tag = cols.next().unwrap().to_string();

    let rendered = dir.path().join("best.png");
    let out = run_ok(
        bin()
            .args(["render", "--in", s(&dump), "--out", s(&rendered), "--tile", "4", "--grid", "3", "--tag", &best_tag])
            .args(weights),
    );
    let text = String::from_utf8_lossy(&out.stdout);
    let line = text.lines().find(|l| l.starts_with("seam=")).unwrap();
    assert!(line.ends_with(&format!("score={search_score}")), "{line} vs {search_score}");
}

#[test]
fn short_dump_fails_before_search() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("short.raw");
    std::fs::write(&dump, vec![0u8; 100]).unwrap();

    let res = bin()
        .args(["search", "--in", s(&dump), "--out", s(&dir.path().join("o")), "--tile", "4", "--grid", "3"])
        .output()
        .unwrap();
    assert!(!res.status.success());
    let err = String::from_utf8_lossy(&res.stderr);
    assert!(err.contains("288"), "stderr:\n{err}");
    assert!(!dir.path().join("o").exists());
}

#[test]
fn inspect_rejects_corrupted_params() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("p.uqp");
    let mut bytes = uiqvga_core::params::format::encode(&truth());
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    std::fs::write(&path, bytes).unwrap();

    let res = bin().args(["inspect", "--params", s(&path)]).output().unwrap();
    assert!(!res.status.success());
    assert!(String::from_utf8_lossy(&res.stdout).contains("checksums=FAILED"));
}
