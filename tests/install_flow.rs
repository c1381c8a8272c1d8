//! Drives the installer stages end to end against temp directories, with a
//! non-escalating broker. Mirrors the order `Installer::run` uses:
//! locate -> pre-flight verify -> place -> post-copy verify.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use ollama_installer::error::InstallError;
use ollama_installer::installer;
use ollama_installer::installer::InstallTarget;
use ollama_installer::privilege::PrivilegeBroker;
use ollama_installer::source::SourceArtifacts;
use tempfile::TempDir;

fn write_lib(dir: &Path, name: &str, mode: u32) {
    fs::write(dir.join(name), b"lib").unwrap();
    fs::set_permissions(dir.join(name), fs::Permissions::from_mode(mode)).unwrap();
}

fn build_source(root: &Path, libs: &[&str]) -> SourceArtifacts {
    let lib_dir = root.join("dist/lib/ollama");
    fs::create_dir_all(&lib_dir).unwrap();
    fs::write(root.join("ollama"), b"binary").unwrap();
    fs::set_permissions(root.join("ollama"), fs::Permissions::from_mode(0o755)).unwrap();
    for lib in libs {
        write_lib(&lib_dir, lib, 0o755);
    }
    SourceArtifacts::locate(root, root).unwrap()
}

fn build_target(root: &Path) -> InstallTarget {
    let bindir = root.join("usr/local/bin");
    let candidates = vec![bindir.clone()];
    let var = std::env::join_paths([&bindir])
        .unwrap()
        .to_string_lossy()
        .into_owned();
    InstallTarget::resolve_with(&var, &candidates)
}

fn snapshot(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap().into_path())
        .collect();
    paths.sort();
    paths
}

#[test]
fn installs_binary_and_libraries_into_search_path_root() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    let source = build_source(src.path(), &["libggml-cuda.so", "libggml-cpu.so"]);
    let target = build_target(dst.path());
    let broker = PrivilegeBroker::direct();

    let lib_count = installer::preflight(&source).unwrap();
    assert_eq!(lib_count, 2);

    installer::Placer::new(&broker).install(&source, &target).unwrap();

    assert!(target.binary.is_file());
    let mode = fs::metadata(&target.binary).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
    assert!(target.lib_dir.join("libggml-cuda.so").is_file());
    assert!(target.lib_dir.join("libggml-cpu.so").is_file());
    assert!(installer::post_copy(&target.lib_dir).is_empty());
}

#[test]
fn rerun_with_added_library_keeps_original_set() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    let source = build_source(src.path(), &["libggml-cuda.so", "libggml-cpu.so"]);
    let target = build_target(dst.path());
    let broker = PrivilegeBroker::direct();

    installer::Placer::new(&broker).install(&source, &target).unwrap();
    let first = snapshot(&target.lib_dir);
    installer::Placer::new(&broker).install(&source, &target).unwrap();
    assert_eq!(snapshot(&target.lib_dir), first);

    write_lib(&source.lib_dir, "libggml-rocm.so", 0o755);
    installer::Placer::new(&broker).install(&source, &target).unwrap();

    for lib in ["libggml-cuda.so", "libggml-cpu.so", "libggml-rocm.so"] {
        assert!(target.lib_dir.join(lib).is_file(), "{lib} missing");
    }
}

#[test]
fn empty_library_set_aborts_before_touching_destination() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    fs::create_dir_all(src.path().join("dist/lib/ollama")).unwrap();
    fs::write(src.path().join("ollama"), b"binary").unwrap();
    let source = SourceArtifacts::locate(src.path(), src.path()).unwrap();

    let before = snapshot(dst.path());
    let err = installer::preflight(&source).unwrap_err();

    assert!(matches!(err, InstallError::NoLibrariesFound(_)));
    assert_eq!(snapshot(dst.path()), before);
}

#[test]
fn single_permission_issue_degrades_but_does_not_fail() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    let source = build_source(src.path(), &["libggml-cuda.so", "libggml-cpu.so"]);
    // One library without the executable bit survives the copy unchanged.
    write_lib(&source.lib_dir, "libggml-vulkan.so", 0o644);
    let target = build_target(dst.path());
    let broker = PrivilegeBroker::direct();

    installer::Placer::new(&broker).install(&source, &target).unwrap();
    let issues = installer::post_copy(&target.lib_dir);

    assert_eq!(issues, vec![target.lib_dir.join("libggml-vulkan.so")]);
}
