use std::fs;
use std::path::{Path, PathBuf};

use mpkscan_core::wire::layout::{
    FIXARRAY, FIXEXT1, FIXMAP, FIXSTR, FLOAT32, FLOAT64, INT16, NIL, TRUE, UINT8,
};

/// Nesting of the `deep_truncated` fixture; deeper than the default report depth.
const DEEP_NESTING: usize = 20;

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_fixture(&root, "scalars", &scalars())?;
    write_fixture(&root, "nested_map", &nested_map())?;
    write_fixture(&root, "deep_truncated", &deep_truncated())?;
    Ok(())
}

/// `[5, -32, 255, -200, 1.5f32, pi, true, nil, "abc"]`
fn scalars() -> Vec<u8> {
    let mut out = vec![FIXARRAY | 9, 0x05, 0xe0, UINT8, 0xff, INT16];
    out.extend_from_slice(&(-200i16).to_be_bytes());
    out.push(FLOAT32);
    out.extend_from_slice(&1.5f32.to_be_bytes());
    out.push(FLOAT64);
    out.extend_from_slice(&std::f64::consts::PI.to_be_bytes());
    out.extend_from_slice(&[TRUE, NIL]);
    push_str(&mut out, "abc");
    out
}

/// `{"name": "mpk", "tags": ["a", "b"], "meta": {"v": 1, "id": ext(7, [0x2a])}}`
fn nested_map() -> Vec<u8> {
    let mut out = vec![FIXMAP | 3];
    push_str(&mut out, "name");
    push_str(&mut out, "mpk");
    push_str(&mut out, "tags");
    out.push(FIXARRAY | 2);
    push_str(&mut out, "a");
    push_str(&mut out, "b");
    push_str(&mut out, "meta");
    out.push(FIXMAP | 2);
    push_str(&mut out, "v");
    out.push(0x01);
    push_str(&mut out, "id");
    out.extend_from_slice(&[FIXEXT1, 7, 0x2a]);
    out
}

/// `[[[...[42]...]]]`
fn deep_truncated() -> Vec<u8> {
    let mut out = vec![FIXARRAY | 1; DEEP_NESTING];
    out.push(0x2a);
    out
}

fn push_str(out: &mut Vec<u8>, text: &str) {
    out.push(FIXSTR | text.len() as u8);
    out.extend_from_slice(text.as_bytes());
}

fn write_fixture(root: &Path, case: &str, bytes: &[u8]) -> Result<(), String> {
    let dir = root.join(case);
    fs::create_dir_all(&dir)
        .map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;
    let path = dir.join("input.mpk");
    fs::write(&path, bytes).map_err(|err| format!("failed to write {}: {}", path.display(), err))?;
    println!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
