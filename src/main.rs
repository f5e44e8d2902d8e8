use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rebuild_bst::{Order, Tree};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Builds a tree from random keys, knocks it out of balance with more random
/// keys and rebuilds it, printing the tree along the way.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// How many random keys to build the tree from
    #[arg(long, env = "BST_COUNT", default_value_t = 15)]
    count: usize,

    /// Exclusive upper bound for the initial keys
    #[arg(long, env = "BST_MAX", default_value_t = 100)]
    max: u32,

    /// How many keys to insert after the tree is built
    #[arg(long, env = "BST_EXTRA", default_value_t = 6)]
    extra: usize,

    /// Exclusive upper bound for the inserted keys
    #[arg(long, env = "BST_EXTRA_MAX", default_value_t = 1000)]
    extra_max: u32,

    /// Seed for a reproducible run
    #[arg(long, env = "BST_SEED")]
    seed: Option<u64>,

    /// Turn debugging information on (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> rebuild_bst::Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    debug!(?cli, "starting demo");

    let keys = random_keys(&mut rng, cli.count, cli.max);
    println!("Random numbers: {:?}", keys);

    let mut tree = Tree::from_keys(keys);
    println!("Is the tree balanced: {}", tree.is_balanced());
    println!("======");
    print!("{}", tree);
    print_traversals(&tree)?;
    println!("=====");

    let more = random_keys(&mut rng, cli.extra, cli.extra_max);
    println!("New numbers: {:?}", more);
    println!("=====");
    for key in more {
        if !tree.insert(key) {
            info!(key, "already in the tree");
        }
    }

    println!("Is the tree still balanced: {}", tree.is_balanced());
    println!("======");
    print!("{}", tree);

    tree.rebalance();
    println!("Is the tree rebalanced: {}", tree.is_balanced());
    println!("======");
    print!("{}", tree);
    println!("=====");
    print_traversals(&tree)?;
    println!("=====");

    Ok(())
}

fn random_keys(rng: &mut StdRng, count: usize, max: u32) -> Vec<u32> {
    // `gen_range` panics on an empty range.
    let max = max.max(1);
    (0..count).map(|_| rng.gen_range(0..max)).collect()
}

fn print_traversals(tree: &Tree<u32>) -> rebuild_bst::Result<()> {
    for order in Order::ALL {
        println!("{}:", order);
        tree.traverse(order, Some(&mut |key: &u32| println!("{}", key)))?;
    }

    Ok(())
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Logs go to stderr so they don't get mixed into the printed tree.
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_classic_demo() {
        let cli = Cli::try_parse_from(["rebuild-bst"]).unwrap();

        assert_eq!(cli.count, 15);
        assert_eq!(cli.max, 100);
        assert_eq!(cli.extra, 6);
        assert_eq!(cli.extra_max, 1000);
        assert_eq!(cli.debug, 0);
    }

    #[test]
    fn seeded_keys_are_reproducible() {
        let a = random_keys(&mut StdRng::seed_from_u64(7), 15, 100);
        let b = random_keys(&mut StdRng::seed_from_u64(7), 15, 100);

        assert_eq!(a, b);
        assert!(a.iter().all(|&k| k < 100));
    }

    #[test]
    fn zero_max_does_not_panic() {
        let keys = random_keys(&mut StdRng::seed_from_u64(1), 3, 0);

        assert_eq!(keys, [0, 0, 0]);
    }
}
