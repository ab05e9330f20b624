use std::path::PathBuf;
use std::process::Command;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_folio")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) { "folio.exe" } else { "folio" });
            p
        })
}

#[test]
fn cli_frames_writes_pngs() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("frames");

    let status = Command::new(exe())
        .args([
            "frames", "--width", "96", "--height", "64", "--frames", "3", "--seed", "9", "--out",
        ])
        .arg(&out)
        .status()
        .unwrap();

    assert!(status.success());
    for i in 0..3 {
        let path = out.join(format!("frame_{i:04}.png"));
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (96, 64));
    }
}

#[test]
fn cli_frames_rejects_invalid_settings() {
    let dir = tempfile::tempdir().unwrap();
    for (i, json) in [r#"{ "time_step": -0.5 }"#, r#"{ "stroke_width": 0.0 }"#]
        .into_iter()
        .enumerate()
    {
        let settings = dir.path().join(format!("settings_{i}.json"));
        std::fs::write(&settings, json).unwrap();
        let out = dir.path().join(format!("frames_{i}"));

        let output = Command::new(exe())
            .args(["frames", "--width", "32", "--height", "32", "--frames", "2"])
            .arg("--settings")
            .arg(&settings)
            .arg("--out")
            .arg(&out)
            .output()
            .unwrap();
        assert!(!output.status.success(), "{json} was accepted");
        assert!(String::from_utf8_lossy(&output.stderr).contains("validation error"));
        assert!(!out.exists());
    }
}

#[test]
fn cli_projects_filters_by_category() {
    let output = Command::new(exe())
        .args(["projects", "--category", "frontend"])
        .env("FOLIO_GITHUB_USERNAME", "octocat")
        .output()
        .unwrap();
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["movieland", "portfolio-website"]);
    assert_eq!(v[0]["github"], "https://github.com/octocat/movieland");
}

#[test]
fn cli_theme_toggle_persists() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("prefs.json");

    let run = |action: &str| {
        let out = Command::new(exe())
            .args(["theme", action, "--prefs"])
            .arg(&prefs)
            .output()
            .unwrap();
        assert!(out.status.success());
        String::from_utf8(out.stdout).unwrap().trim().to_string()
    };

    assert_eq!(run("show"), "dark");
    assert_eq!(run("toggle"), "light");
    assert_eq!(run("show"), "light");
    assert_eq!(run("toggle"), "dark");
}

#[test]
fn cli_contact_dry_run() {
    let ok = Command::new(exe())
        .args([
            "contact",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--message",
            "hello",
            "--to",
            "owner@example.com",
        ])
        .env_remove("FOLIO_EMAILJS_SERVICE_ID")
        .status()
        .unwrap();
    assert!(ok.success());

    let bad = Command::new(exe())
        .args([
            "contact",
            "--name",
            "Ada",
            "--email",
            "not-an-address",
            "--message",
            "hello",
            "--to",
            "owner@example.com",
        ])
        .status()
        .unwrap();
    assert!(!bad.success());
}

#[test]
fn cli_card_reports_owner_links() {
    let out = Command::new(exe())
        .arg("card")
        .env("FOLIO_PORTFOLIO_NAME", "Ada Lovelace")
        .env("FOLIO_PORTFOLIO_EMAIL", "ada@example.com")
        .env_remove("FOLIO_PORTFOLIO_PHONE")
        .output()
        .unwrap();
    assert!(out.status.success());
    let card: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(card["headlines"][0], "Hi, I'm Ada Lovelace");
    assert_eq!(card["cv"]["file_name"], "Ada-Lovelace-CV.pdf");
    assert_eq!(card["contact"][0]["href"], "mailto:ada@example.com");
    let shortcuts = card["shortcuts"].as_array().unwrap();
    assert_eq!(shortcuts.first().unwrap(), "Email");
    assert_eq!(shortcuts.last().unwrap(), "Contact Form");
}
