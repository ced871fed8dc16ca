#![allow(dead_code)]

use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
};

use kapreport::{
    cmd::{run_with_args, Args},
    util::rw::WriteHandle,
};

// Tests run in parallel, and dirs are only created when written to.
static NEXT_DIR_ID: AtomicUsize = AtomicUsize::new(1);

fn test_temp_dir_path() -> PathBuf {
    let tmpdir = std::env::temp_dir();
    let pid = std::process::id();

    for _ in 0..1000000 {
        let val = NEXT_DIR_ID.fetch_add(1, Ordering::SeqCst);
        let path = tmpdir.join(format!("kapreport-test-{pid}-{val}"));
        if !path.exists() {
            return path;
        }
    }
    panic!("Could not create temp directory path that does not already exist");
}

/// A fresh temp dir path, removed (if it was ever created) on drop.
/// The directory itself is not created, the writers do that.
pub struct NonAutoCreatingTestDir {
    pub path: PathBuf,
}

impl NonAutoCreatingTestDir {
    pub fn new() -> NonAutoCreatingTestDir {
        NonAutoCreatingTestDir { path: test_temp_dir_path() }
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

fn cleanup_test_dir(path: &PathBuf) {
    if !path.exists() {
        return;
    }
    let skip_env_var = "SKIP_TEMP_DIR_CLEANUP_ON_FAIL";
    let skip_del_on_fail = kapreport::util::sys::env_var_non_empty(skip_env_var);

    if std::thread::panicking() && skip_del_on_fail {
        println!("cleanup_test_dir: panicking. Skipping remove of {}", path.display());
    } else {
        println!(
            "cleanup_test_dir: removing {}. To skip cleanup, set {}",
            path.display(),
            skip_env_var
        );
        let _ = fs::remove_dir_all(path);
    }
}

impl Drop for NonAutoCreatingTestDir {
    fn drop(&mut self) {
        cleanup_test_dir(&self.path);
    }
}

pub fn data_file(name: &str) -> PathBuf {
    PathBuf::from("./tests/data").join(name)
}

/// Runs the cli entry point, returning (result, stdout, stderr)
pub fn run_and_get_output(args: Args) -> (Result<(), ()>, String, String) {
    let (out_w, out_b) = WriteHandle::string_buff_write_handle();
    let (err_w, err_b) = WriteHandle::string_buff_write_handle();
    let res = run_with_args(args, out_w, err_w);
    let out = out_b.borrow_mut().export_string();
    let err = err_b.borrow_mut().export_string();
    (res, out, err)
}
