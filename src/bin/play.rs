use std::error::Error;
use std::rc::Rc;

use clap::Parser;
use bitmerge::{Agent, DepthPolicy, GameTree, Player};

#[derive(Debug, Parser)]
#[command(name = "play", about = "Bitmerge self-play driver")]
struct Args {
    /// Explicit starting sequence of '0'/'1' digits (overrides --length)
    #[arg(long)]
    sequence: Option<String>,

    /// Length of the randomly generated starting sequence
    #[arg(long, default_value_t = 10)]
    length: usize,

    /// Seed for random sequence generation (deterministic)
    #[arg(long, default_value_t = 0x00C0FFEEu64)]
    seed: u64,

    /// Fixed lookahead depth materialized ahead of the current state
    #[arg(long, default_value_t = 5)]
    depth_limit: usize,

    /// Recompute the lookahead from the remaining length before every move
    #[arg(long, default_value_t = false)]
    dynamic_depth: bool,

    /// Algorithm for player 1: minimax | alpha_beta | heuristic
    #[arg(long, default_value = "minimax")]
    p1: String,

    /// Algorithm for player 2: minimax | alpha_beta | heuristic
    #[arg(long, default_value = "alpha_beta")]
    p2: String,
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let policy = if args.dynamic_depth {
        DepthPolicy::Dynamic
    } else {
        DepthPolicy::Fixed(args.depth_limit)
    };
    let mut tree = match &args.sequence {
        Some(s) => GameTree::from_sequence(s, policy)?,
        None => GameTree::random(args.length, args.seed, policy)?,
    };
    let mut p1 = Agent::new(&args.p1)?;
    let mut p2 = Agent::new(&args.p2)?;

    println!(
        "[play] player 1 ({}) vs player 2 ({}) | start {}",
        p1.algorithm().name(),
        p2.algorithm().name(),
        tree.current_state().borrow()
    );

    let start = Rc::clone(tree.current_state());
    let (_, predicted) = p1.get_path(&start, true);
    p1.reset_counter();
    if predicted > 0.0 {
        println!("[play] player 1 predicted to win ({predicted:.3})");
    } else if predicted < 0.0 {
        println!("[play] player 2 predicted to win ({predicted:.3})");
    } else {
        println!("[play] draw predicted");
    }

    while !tree.is_finished() {
        let mover = tree.current_player();
        let agent = match mover {
            Player::One => &mut p1,
            Player::Two => &mut p2,
        };
        let cur = Rc::clone(tree.current_state());
        let (path, _) = agent.get_path(&cur, mover == Player::One);
        let next = path
            .get(1)
            .cloned()
            .ok_or("search returned no next move for a non-terminal state")?;
        tree.advance_by_child(&next)?;
        println!(
            "[play] move #{} by player {} -> {}",
            tree.current_depth(),
            mover.number(),
            tree.current_state().borrow()
        );
    }

    let final_state = tree.current_state().borrow();
    let diff = final_state.score_diff();
    println!(
        "[play] game over after {} moves | final {}",
        tree.current_depth(),
        final_state
    );
    if diff > 0 {
        println!("[play] player 1 wins by {diff}");
    } else if diff < 0 {
        println!("[play] player 2 wins by {}", -diff);
    } else {
        println!("[play] draw");
    }
    println!(
        "[play] nodes visited: player 1 ({}) = {} | player 2 ({}) = {}",
        p1.algorithm().name(),
        p1.nodes_visited(),
        p2.algorithm().name(),
        p2.nodes_visited()
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("[play] error: {e}");
        std::process::exit(1);
    }
}
