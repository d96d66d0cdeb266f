//! quotecache - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quotecache key <resource> ...` | Print the cache key of a request |
//! | `quotecache ttl <resource> ...` | Print the TTL band of a request |
//! | `quotecache bands` | List the TTL bands |
//! | `quotecache backends` | List registered cache backends |
//! | `quotecache check` | Ping the configured backend |
//! | `quotecache config` | Print the effective configuration |

// Force-link quotecache-providers so linkme registrations are included
extern crate quotecache_providers;

use clap::Parser;
use quotecache::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let output = run(cli).await?;
    println!("{output}");
    Ok(())
}
