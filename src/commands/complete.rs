use anyhow::Result;
use std::path::PathBuf;

use objj::{settings, CompletionIndex, QueryContext};

pub fn execute(
    receiver: Option<String>,
    bracketed: bool,
    prefix: &str,
    lib_dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let lib_dir = match lib_dir {
        Some(dir) => dir,
        None => settings::load()?.resolved_lib_dir(),
    };

    let index = CompletionIndex::open(lib_dir);
    let context = QueryContext {
        bracketed,
        receiver,
    };
    let completions = index.query(&context, prefix);

    if json {
        println!("{}", serde_json::to_string_pretty(&completions)?);
        return Ok(());
    }

    for completion in &completions {
        println!("{}\t{}", completion.label, completion.template);
    }
    Ok(())
}
