use bin_tree::BinTree;
use clap::Parser;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

#[derive(Parser)]
#[command(name = "bin-tree-demo")]
#[command(about = "Walks through the counting binary tree operations")]
struct Args {
    /// Extra operations run after the sample: +KEY=VALUE, -KEY or ?KEY.
    /// Flags go before the first operation; anything after it is read as an
    /// operation
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    ops: Vec<Op>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Add(i64, String),
    Remove(i64),
    Query(i64),
}

#[derive(Error, Debug, PartialEq)]
enum ParseOpError {
    #[error("operation has no key")]
    MissingKey,

    #[error("add needs a value: +KEY=VALUE")]
    MissingValue,

    #[error("unknown operation prefix {0:?}, expected one of + - ?")]
    UnknownPrefix(char),

    #[error("invalid key: {0}")]
    InvalidKey(#[from] ParseIntError),
}

fn parse_key(s: &str) -> Result<i64, ParseOpError> {
    if s.is_empty() {
        return Err(ParseOpError::MissingKey);
    }
    Ok(s.parse()?)
}

impl FromStr for Op {
    type Err = ParseOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(prefix) = chars.next() else {
            return Err(ParseOpError::MissingKey);
        };
        let rest = chars.as_str();
        match prefix {
            '+' => {
                let (key, value) = rest.split_once('=').ok_or(ParseOpError::MissingValue)?;
                Ok(Op::Add(parse_key(key)?, value.to_string()))
            }
            '-' => Ok(Op::Remove(parse_key(rest)?)),
            '?' => Ok(Op::Query(parse_key(rest)?)),
            other => Err(ParseOpError::UnknownPrefix(other)),
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn main() {
    let args = Args::parse();
    bin_tree::logging::init(args.debug);

    println!("Create a binary tree:");
    let mut tree: BinTree<i64, String> = BinTree::new();
    for (key, value) in [
        (1, "One"),
        (2, "two"),
        (3, "three"),
        (0, "Zero"),
        (10, "Ten"),
        (1, "One"),
        (1, "One"),
        (10, "Ten"),
    ] {
        tree.add(key, value.to_string());
    }
    print!("{tree}");

    println!(
        "Lets see if the tree contains key 5: {}",
        yes_no(tree.contains(&5))
    );
    println!("Well, lets add 5 to the tree:");
    tree.add(5, "five".to_string());
    println!("Let's see if it contains now: {}", yes_no(tree.contains(&5)));
    println!("We want to be sure:");
    print!("{tree}");

    println!("Looks like there are too many ones here. Let's delete them:");
    tree.remove(&1);
    print!("{tree}");

    if args.ops.is_empty() {
        return;
    }
    info!(count = args.ops.len(), "running extra operations");
    for op in args.ops {
        match op {
            Op::Add(key, value) => tree.add(key, value),
            Op::Remove(key) => tree.remove(&key),
            Op::Query(key) => println!(
                "[{key}] contained: {}, count: {}",
                yes_no(tree.contains(&key)),
                tree.count(&key)
            ),
        }
    }
    println!("After extra operations:");
    print!("{tree}");
}
