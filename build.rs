use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 한글 UI 문자열을 그릴 폰트를 찾아 egui용 스텁 파일을 생성한다.
fn main() {
    println!("cargo:rerun-if-env-changed=SCENARIO_SWITCHER_FONT");
    generate_font_stub().expect("폰트 스텁 생성 실패");
}

/// `embedded_font_bytes()` 함수를 OUT_DIR에 기록한다.
fn generate_font_stub() -> std::io::Result<()> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR 미설정"));
    let dest = out_dir.join("custom_font.rs");
    let content = match locate_font_file() {
        Some(path) => {
            let escaped = path.to_string_lossy().replace('\\', "\\\\");
            format!(
                "pub fn embedded_font_bytes() -> Option<&'static [u8]> {{\n    Some(include_bytes!(\"{escaped}\"))\n}}\n"
            )
        }
        None => "pub fn embedded_font_bytes() -> Option<&'static [u8]> { None }\n".to_string(),
    };
    fs::write(dest, content)
}

/// 명시적으로 지정된 폰트를 우선 사용하고, 없으면 시스템 폰트 디렉터리를 탐색한다.
fn locate_font_file() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os("SCENARIO_SWITCHER_FONT") {
        let path = PathBuf::from(explicit);
        if path.is_file() {
            println!("cargo:rerun-if-changed={}", path.display());
            return Some(path);
        }
        println!(
            "cargo:warning=SCENARIO_SWITCHER_FONT 경로를 찾을 수 없습니다: {}",
            path.display()
        );
    }
    let mut candidates: Vec<PathBuf> = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("/Library/Fonts"),
    ];
    if let Some(home) = env::var_os("HOME") {
        candidates.push(Path::new(&home).join(".fonts"));
    }
    if let Some(windir) = env::var_os("WINDIR") {
        candidates.push(Path::new(&windir).join("Fonts"));
    }
    let keywords = ["noto", "nanum", "malgun", "applegothic", "pretendard"];
    for dir in candidates.into_iter().filter(|dir| dir.exists()) {
        for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            let lower = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|s| s.to_ascii_lowercase())
                .unwrap_or_default();
            if !keywords.iter().any(|k| lower.contains(k)) {
                continue;
            }
            let is_font = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
                .unwrap_or(false);
            if is_font {
                println!("cargo:rerun-if-changed={}", path.display());
                return Some(path);
            }
        }
    }
    println!("cargo:warning=한글 폰트를 찾지 못했습니다. egui 기본 폰트가 사용됩니다.");
    None
}
