//! Scoped temp files: acquire two files concurrently, work with both,
//! and let the batch delete them afterwards - even if the work fails.
//!
//! Run with: cargo run --example file_scopes

use std::io;
use std::path::PathBuf;

use breakwater::{using2, Acquirable, Disposer};

fn scratch_file(name: &str, content: &'static str) -> Disposer<PathBuf, io::Error> {
    let path = std::env::temp_dir().join(format!("breakwater_demo_{}.txt", name));
    Disposer::new(
        async move {
            tokio::fs::write(&path, content).await?;
            println!("created {}", path.display());
            Ok(path)
        },
        |path| async move {
            tokio::fs::remove_file(&path).await?;
            println!("removed {}", path.display());
            Ok(())
        },
    )
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let merged = using2(
        Acquirable::from(scratch_file("left", "hello")),
        Acquirable::from(scratch_file("right", "world")),
        |left: &PathBuf, right: &PathBuf| {
            let left = left.clone();
            let right = right.clone();
            async move {
                let a = tokio::fs::read_to_string(&left).await?;
                let b = tokio::fs::read_to_string(&right).await?;
                Ok(format!("{} {}", a, b))
            }
        },
    )
    .await?;

    // Both files are already gone by the time we get here.
    println!("merged: {}", merged);
    Ok(())
}
