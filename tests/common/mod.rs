//! Common test utilities shared across integration tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::Once;
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Install a fmt subscriber once so `RUST_LOG` works in tests.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Write an executable shell script standing in for the dbt binary.
pub fn stub_dbt(dir: &TempDir, script: &str) -> PathBuf {
    let path = dir.path().join("dbt");
    fs::write(&path, script).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// A stub that prints its argument vector to stdout and exits 0.
pub fn echo_stub(dir: &TempDir) -> PathBuf {
    stub_dbt(dir, "#!/bin/sh\necho \"$@\"\n")
}

/// A stub that writes to stderr and exits with the given code.
pub fn failing_stub(dir: &TempDir, code: i32) -> PathBuf {
    stub_dbt(
        dir,
        &format!("#!/bin/sh\necho \"Database Error in model orders\" >&2\nexit {code}\n"),
    )
}
