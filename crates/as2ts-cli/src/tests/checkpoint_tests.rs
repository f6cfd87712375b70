use super::checkpoint::{Checkpoint, ResumeGate};

#[test]
fn parses_and_renders() {
    let checkpoint = Checkpoint::parse("src|out|game/Hero.as\n").expect("valid checkpoint");
    assert_eq!(checkpoint, Checkpoint::new("src", "out", "game/Hero.as"));
    assert_eq!(checkpoint.render(), "src|out|game/Hero.as");
}

#[test]
fn rejects_incomplete_text() {
    assert_eq!(Checkpoint::parse("src|out"), None);
    assert_eq!(Checkpoint::parse(""), None);
}

#[test]
fn file_part_keeps_extra_separators() {
    let checkpoint = Checkpoint::parse("a|b|c|d").expect("valid checkpoint");
    assert_eq!(checkpoint.file, "c|d");
}

#[test]
fn save_and_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("last.txt");
    assert_eq!(Checkpoint::load(&path).expect("load"), None);

    let checkpoint = Checkpoint::new("in", "out", "A.as");
    checkpoint.save(&path).expect("save");
    assert_eq!(Checkpoint::load(&path).expect("load"), Some(checkpoint));
}

#[test]
fn open_gate_admits_everything() {
    let mut gate = ResumeGate::open();
    assert!(!gate.is_resuming());
    assert!(gate.admits("A.as"));
    assert!(gate.admits("B.as"));
}

#[test]
fn resuming_gate_skips_until_target() {
    let mut gate = ResumeGate::resume_at("B.as");
    assert!(!gate.admits("A.as"));
    assert!(gate.admits("B.as"));
    assert!(gate.admits("A.as"));
    assert!(gate.admits("C.as"));

    let mut next_phase = gate.restarted();
    assert!(!next_phase.admits("A.as"));
    assert!(next_phase.admits("B.as"));
}

#[test]
fn gate_for_run_requires_matching_paths() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("last.txt");
    Checkpoint::new("in", "out", "B.as").save(&path).expect("save");

    let matching = ResumeGate::for_run(true, &path, "in", "out").expect("gate");
    assert!(matching.is_resuming());

    let other_output = ResumeGate::for_run(true, &path, "in", "elsewhere").expect("gate");
    assert!(!other_output.is_resuming());

    let disabled = ResumeGate::for_run(false, &path, "in", "out").expect("gate");
    assert!(!disabled.is_resuming());

    let missing = ResumeGate::for_run(true, &dir.path().join("none.txt"), "in", "out")
        .expect("gate");
    assert!(!missing.is_resuming());
}
