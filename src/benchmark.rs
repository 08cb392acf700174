use bin_tree::{BinTree, TreeOps};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use std::time::Instant;
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Order {
    Ascending,
    Descending,
    Shuffled,
}

#[derive(Parser)]
#[command(name = "tree-benchmark")]
#[command(about = "A tree performance testing tool")]
struct Args {
    #[arg(long, default_value = "100000")]
    size: usize,

    /// Insertion order; sorted orders degrade the tree into a chain
    #[arg(long, value_enum, default_value_t = Order::Shuffled)]
    order: Order,

    #[arg(long, default_value = "42")]
    seed: u64,

    /// How many times every key is added
    #[arg(long, default_value = "1")]
    repeat: usize,

    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn keys(args: &Args) -> Vec<usize> {
    let mut keys: Vec<usize> = (0..args.size).collect();
    match args.order {
        Order::Ascending => {}
        Order::Descending => keys.reverse(),
        Order::Shuffled => {
            let mut rng = rand::rngs::StdRng::seed_from_u64(args.seed);
            keys.shuffle(&mut rng);
        }
    }
    keys
}

struct Timings {
    inserted: Instant,
    checked_count: Instant,
}

fn run<T: TreeOps<usize, usize>>(tree: &mut T, keys: &[usize], repeat: usize) -> Timings {
    for round in 0..repeat {
        for (i, &key) in keys.iter().enumerate() {
            if round == 0 {
                assert_eq!(tree.len(), i);
            }
            tree.add(key, key);
            assert!(tree.contains(&key));
        }
        info!(round, "finished add round");
    }
    let inserted = Instant::now();
    for key in keys {
        assert_eq!(tree.count(key), repeat);
    }
    let checked_count = Instant::now();
    for key in keys {
        tree.remove(key);
        assert!(!tree.contains(key));
    }
    assert!(tree.is_empty());
    Timings {
        inserted,
        checked_count,
    }
}

fn main() {
    let args = Args::parse();
    bin_tree::logging::init(args.debug);

    let keys = keys(&args);
    let repeat = args.repeat.max(1);
    let mut tree = BinTree::new();

    println!(
        "Running with {:?} order, {} keys, each added {} times",
        args.order, args.size, repeat
    );

    let start = Instant::now();
    let Timings {
        inserted,
        checked_count,
    } = run(&mut tree, &keys, repeat);
    let end = Instant::now();

    println!(
        "Adds took {} seconds",
        inserted.saturating_duration_since(start).as_secs_f32()
    );
    println!(
        "Checking counts took {} seconds",
        checked_count
            .saturating_duration_since(inserted)
            .as_secs_f32()
    );
    println!(
        "Removals took {} seconds",
        end.saturating_duration_since(checked_count).as_secs_f32()
    );
    println!(
        "Total {} seconds",
        end.saturating_duration_since(start).as_secs_f32()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_empties_tree_for_every_order() {
        for order in [Order::Ascending, Order::Descending, Order::Shuffled] {
            let args = Args::try_parse_from(["tree-benchmark", "--size", "300", "--repeat", "3"])
                .unwrap();
            let args = Args { order, ..args };
            let keys = keys(&args);
            assert_eq!(keys.len(), 300);

            let mut tree = BinTree::new();
            run(&mut tree, &keys, args.repeat);
            assert!(tree.is_empty());
        }
    }
}
