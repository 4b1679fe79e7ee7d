/*!
 * Tests for file system utilities
 */

use subsequence::file_utils::FileManager;
use crate::common;

/// Existence checks distinguish files from directories
#[test]
fn test_existence_checks_withFileAndDir_shouldDistinguish() {
    let temp_dir = common::create_temp_dir().unwrap();
    let file = common::create_test_file(temp_dir.path(), "a.txt", "hi").unwrap();

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::dir_exists(&file));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path()));
}

/// write_to_file creates parent directories as needed
#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() {
    let temp_dir = common::create_temp_dir().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("out.xml");

    FileManager::write_to_file(&nested, "<xmeml/>").unwrap();
    assert_eq!(FileManager::read_to_string(&nested).unwrap(), "<xmeml/>");
}

/// Numbered image discovery returns sorted indices and ignores noise
#[test]
fn test_find_numbered_images_withMixedFiles_shouldReturnSortedIndices() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path();

    common::create_test_file(dir, "10.png", "x").unwrap();
    common::create_test_file(dir, "2.png", "x").unwrap();
    common::create_test_file(dir, "1.png", "x").unwrap();
    common::create_test_file(dir, "cover.png", "x").unwrap();
    common::create_test_file(dir, "3.jpg", "x").unwrap();
    common::create_test_file(dir, "notes.txt", "x").unwrap();

    let indices = FileManager::find_numbered_images(dir, "png").unwrap();
    assert_eq!(indices, vec![1, 2, 10]);
}

/// Extension matching is case-insensitive
#[test]
fn test_find_numbered_images_withUppercaseExtension_shouldMatch() {
    let temp_dir = common::create_temp_dir().unwrap();
    common::create_test_file(temp_dir.path(), "1.PNG", "x").unwrap();

    let indices = FileManager::find_numbered_images(temp_dir.path(), "png").unwrap();
    assert_eq!(indices, vec![1]);
}

/// An empty directory yields an empty index list
#[test]
fn test_find_numbered_images_withEmptyDir_shouldReturnEmpty() {
    let temp_dir = common::create_temp_dir().unwrap();
    let indices = FileManager::find_numbered_images(temp_dir.path(), "png").unwrap();
    assert!(indices.is_empty());
}
