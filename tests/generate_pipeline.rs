//! End-to-end tests for completion generation and lookup (no editor required)

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use objj::completions::{self, Category, CompletionFile};
use objj::paths;
use objj::{CompletionIndex, QueryContext};

const CP_FOO: &str = r#"
@import <Foundation/CPObject.j>

@implementation CPFoo : CPObject
{
    id  _value;
}

- (void)setValue:(id)aValue
{
    _value = aValue;
}

+ (id)defaultValue
{
    return nil;
}

@end
"#;

const CP_BAR: &str = r#"
CPBarStyleRound = 1;

function CPThemeBlendColors(color1, color2)
{
}

@implementation CPBar : CPFoo

- (void)setValue:(CPString)aString
{
}

+ (id)bar
{
}

@end

@implementation CPFoo (Archiving)

+ (id)archivedFoo
{
}

@end
"#;

fn cappuccino_tree() -> Result<TempDir> {
    let tmp = TempDir::new()?;
    let root = tmp.path();

    fs::create_dir_all(root.join("Foundation"))?;
    fs::write(root.join("Foundation/CPFoo.j"), CP_FOO)?;

    fs::create_dir_all(root.join("AppKit/CPBar"))?;
    fs::write(root.join("AppKit/CPBar/CPBar.j"), CP_BAR)?;
    fs::write(root.join("AppKit/NotSource.j"), "@implementation CPHidden\n@end\n")?;

    fs::create_dir_all(root.join("AppKit/Resources"))?;
    fs::write(
        root.join("AppKit/Resources/CPTheme.j"),
        "@implementation CPTheme\n@end\n",
    )?;

    Ok(tmp)
}

fn read_table(lib: &Path, category: Category) -> Result<CompletionFile> {
    CompletionFile::read(&paths::completions::category_path(lib, category.file_stem()))
}

fn read_class(lib: &Path, class_name: &str) -> Result<CompletionFile> {
    CompletionFile::read(&paths::completions::class_path(lib, class_name))
}

fn snapshot(lib: &Path) -> Result<Vec<(PathBuf, Vec<u8>)>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(lib).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push((entry.path().to_path_buf(), fs::read(entry.path())?));
        }
    }
    Ok(files)
}

#[test]
fn test_generate_writes_expected_tables() -> Result<()> {
    let source = cappuccino_tree()?;
    let out = TempDir::new()?;
    let lib = out.path().join("lib");

    let stats = completions::generate(source.path(), &lib)?;
    assert_eq!(stats.files_scanned, 2);
    assert_eq!(stats.classes, 2);

    let classes = read_table(&lib, Category::Classes)?;
    let names: Vec<_> = classes.completions.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(names, vec!["CPBar", "CPFoo"], "Resources and non-matching files are skipped");

    let foo = read_class(&lib, "CPFoo")?;
    assert_eq!(foo.superclass.as_deref(), Some("CPObject"));
    let foo_methods: Vec<_> = foo.completions.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(
        foo_methods,
        vec!["archivedFoo", "defaultValue"],
        "category methods merge into the class"
    );

    let bar = read_class(&lib, "CPBar")?;
    assert_eq!(bar.superclass.as_deref(), Some("CPFoo"));

    let functions = read_table(&lib, Category::Functions)?;
    assert_eq!(functions.completions[0].label, "CPThemeBlendColors()");
    assert_eq!(
        functions.completions[0].template,
        "CPThemeBlendColors(${1:color1}, ${2:color2})"
    );

    let constants = read_table(&lib, Category::Constants)?;
    assert_eq!(constants.completions[0].label, "CPBarStyleRound");
    Ok(())
}

#[test]
fn test_identical_selectors_collapse_to_one_entry() -> Result<()> {
    let source = cappuccino_tree()?;
    let out = TempDir::new()?;

    completions::generate(source.path(), out.path())?;

    let methods = read_table(out.path(), Category::InstanceMethods)?;
    let matching: Vec<_> = methods
        .completions
        .iter()
        .filter(|c| c.label == "setValue:")
        .collect();
    assert_eq!(matching.len(), 1);

    // AppKit is scanned before Foundation, so CPFoo's declaration wins
    assert_eq!(matching[0].template, "setValue:${1:(id)aValue}");
    Ok(())
}

#[test]
fn test_regeneration_is_byte_identical() -> Result<()> {
    let source = cappuccino_tree()?;
    let out = TempDir::new()?;

    completions::generate(source.path(), out.path())?;
    let first = snapshot(out.path())?;
    completions::generate(source.path(), out.path())?;
    let second = snapshot(out.path())?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_missing_framework_aborts_before_writing() -> Result<()> {
    let source = TempDir::new()?;
    fs::create_dir_all(source.path().join("AppKit"))?;
    let out = TempDir::new()?;
    let lib = out.path().join("lib");

    let err = completions::generate(source.path(), &lib).unwrap_err();
    assert!(err
        .to_string()
        .contains("does not appear to be a Cappuccino source directory"));
    assert!(!lib.exists());
    Ok(())
}

#[test]
fn test_source_must_be_a_directory() -> Result<()> {
    let out = TempDir::new()?;
    let err = completions::generate(&out.path().join("missing"), out.path()).unwrap_err();
    assert!(err.to_string().contains("is not a valid path to a directory"));
    Ok(())
}

#[test]
fn test_undecodable_source_is_skipped_not_fatal() -> Result<()> {
    let source = cappuccino_tree()?;
    fs::write(
        source.path().join("Foundation/CPBad.j"),
        [0xff, 0xfe, 0x00, 0x80],
    )?;

    let (tables, stats) = completions::collect(source.path())?;

    assert_eq!(stats.files_skipped, 1);
    assert_eq!(stats.files_scanned, 2);
    let classes: Vec<&str> = tables.class_names().collect();
    assert!(classes.contains(&"CPFoo"));
    assert!(classes.contains(&"CPBar"));
    Ok(())
}

#[test]
fn test_generated_tables_answer_queries() -> Result<()> {
    let source = cappuccino_tree()?;
    let out = TempDir::new()?;
    completions::generate(source.path(), out.path())?;

    let index = CompletionIndex::open(out.path());

    let class_methods = index.query(&QueryContext::message_to("CPBar"), "");
    let labels: Vec<_> = class_methods.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["bar", "archivedFoo", "defaultValue"]);

    let top_level = index.query(&QueryContext::top_level(), "cpthe");
    assert_eq!(top_level.len(), 1);
    assert_eq!(top_level[0].label, "CPThemeBlendColors()");
    Ok(())
}
