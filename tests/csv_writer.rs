use repo_audience::csv_writer::write_records;
use repo_audience::models::UserProfile;
use tempfile::TempDir;

fn profile(login: &str, name: &str, company: &str, interests: &str) -> UserProfile {
    UserProfile {
        person_name: name.to_string(),
        github_profile_link: format!("https://github.com/{}", login),
        email: format!("{}@example.com", login),
        company: company.to_string(),
        interests: interests.to_string(),
    }
}

#[test]
fn test_empty_records_write_no_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("widgets_stargazers.csv");

    let records: Vec<UserProfile> = Vec::new();
    let written = write_records(&records, &path).expect("write should succeed");

    assert!(written.is_none());
    assert!(!path.exists());
    let entries = std::fs::read_dir(temp_dir.path()).expect("Failed to read dir").count();
    assert_eq!(entries, 0);
}

#[test]
fn test_header_follows_field_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("out.csv");

    write_records(&[profile("alice", "Alice", "", "")], &path).expect("write");

    let contents = std::fs::read_to_string(&path).expect("Failed to read");
    let header = contents.lines().next().expect("header line");
    assert_eq!(header, "person_name,github_profile_link,email,company,interests");
}

#[test]
fn test_written_records_read_back_equal() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("out.csv");

    let records = vec![
        profile("alice", "Alice Liddell", "Acme, Inc.", "Rust \"and\" Go"),
        profile("bob", "", "", "line one\nline two"),
        profile("carol", "Carol", "Initech", ""),
    ];

    let written = write_records(&records, &path)
        .expect("write")
        .expect("file written");
    assert_eq!(written, path);

    let mut reader = csv::Reader::from_path(&path).expect("Failed to open reader");
    let read_back: Vec<UserProfile> = reader
        .deserialize()
        .map(|r| r.expect("Failed to read record"))
        .collect();

    assert_eq!(read_back, records);
}

#[test]
fn test_missing_directory_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("no_such_dir").join("out.csv");

    let result = write_records(&[profile("alice", "Alice", "", "")], &path);
    assert!(result.is_err());
    assert!(!path.exists());
}

#[cfg(unix)]
#[test]
fn test_new_file_mode_matches_plain_create() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("widgets_stargazers.csv");
    let plain = temp_dir.path().join("plain.txt");

    write_records(&[profile("alice", "Alice", "", "")], &path).expect("write");
    std::fs::write(&plain, "plain\n").expect("Failed to write plain file");

    let written_mode = std::fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
    let plain_mode = std::fs::metadata(&plain).expect("metadata").permissions().mode() & 0o777;
    assert_eq!(written_mode, plain_mode, "CSV mode {:o} should follow the umask", written_mode);
}

#[cfg(unix)]
#[test]
fn test_existing_file_keeps_its_mode() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("widgets_forkers.csv");
    std::fs::write(&path, "stale\n").expect("Failed to seed file");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).expect("chmod");

    write_records(&[profile("bob", "Bob", "", "")], &path).expect("write");

    let mode = std::fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
    assert_eq!(mode, 0o640);
    let contents = std::fs::read_to_string(&path).expect("Failed to read");
    assert!(contents.contains("https://github.com/bob"));
}
