//! A batch mixing all four item shapes: a plain value, a bare future, a
//! disposer, and a future that resolves to a disposer.
//!
//! Run with: cargo run --example mixed_batch

use breakwater::{using, Acquirable, DisposerExt};

#[tokio::main]
async fn main() -> Result<(), String> {
    let plain = Acquirable::value("plain".to_string());

    let pending = Acquirable::pending(async {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        Ok("pending".to_string())
    });

    let scoped = Acquirable::from(
        async { Ok::<_, String>("scoped".to_string()) }.disposer_sync(|value| {
            println!("released {}", value);
            Ok(())
        }),
    );

    // e.g. a connection checked out of a pool that itself takes time to open
    let deferred = Acquirable::pending_disposer(async {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        Ok(
            async { Ok::<_, String>("deferred".to_string()) }.disposer_sync(|value| {
                println!("released {}", value);
                Ok(())
            }),
        )
    });

    let summary = using(
        vec![plain, pending, scoped, deferred],
        |values: &[String]| {
            let joined = values.join(", ");
            async move { Ok(joined) }
        },
    )
    .await?;

    // Only the two disposer-shaped items were released above.
    println!("handled: {}", summary);
    Ok(())
}
