//! Plan on a preset MDP from the command line.
//!
//! ```text
//! RUST_LOG=info trailblazer --model chain --gamma 0.1 --delta 0.9 --epsilon 0.2
//! trailblazer --config planner.json --model corridor --length 3
//! ```

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use trailblazer::models::{presets, StateId, TabularMdp};
use trailblazer::planner::{AlphaMode, PlannerConfig, TrailBlazer};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Model {
    /// Four-state chain; action 1 is optimal.
    Chain,
    /// Noisy corridor with the goal at the right end.
    Corridor,
    /// One looping state with per-action rewards.
    Bandit,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "TrailBlazer planning on a reference MDP", long_about = None)]
struct Args {
    /// Preset model to plan on.
    #[arg(long, value_enum, default_value = "chain")]
    model: Model,

    /// JSON file holding a planner configuration; overrides the numeric flags.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Discount factor γ.
    #[arg(long, default_value_t = 0.1)]
    gamma: f64,

    /// Failure probability δ.
    #[arg(long, default_value_t = 0.9)]
    delta: f64,

    /// Target precision ε.
    #[arg(long, default_value_t = 0.2)]
    epsilon: f64,

    /// Use the derived α instead of 0.
    #[arg(long)]
    theoretical_alpha: bool,

    /// Corridor length.
    #[arg(long, default_value_t = 3)]
    length: u32,

    /// Corridor slip probability.
    #[arg(long, default_value_t = 0.1)]
    slip: f64,

    /// Bandit rewards.
    #[arg(long, value_delimiter = ',', default_value = "1.0,0.0")]
    rewards: Vec<f64>,

    /// Seed for stochastic outcomes.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl Args {
    fn planner_config(&self) -> Result<PlannerConfig, Box<dyn Error>> {
        if let Some(path) = &self.config {
            let text = fs::read_to_string(path)?;
            return Ok(serde_json::from_str(&text)?);
        }
        let alpha = if self.theoretical_alpha { AlphaMode::Theoretical } else { AlphaMode::Zero };
        Ok(PlannerConfig::new(self.gamma, self.delta, self.epsilon).with_alpha(alpha))
    }

    fn mdp(&self) -> TabularMdp {
        match self.model {
            Model::Chain => presets::chain(),
            Model::Corridor => presets::slippery_corridor(self.length, self.slip, self.seed),
            Model::Bandit => presets::bandit(&self.rewards),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = args.planner_config()?;
    let mdp = args.mdp();
    let root: StateId = 0;
    let exact = mdp.optimal_value(root, config.gamma);

    let mut planner = TrailBlazer::new(mdp, root, config)?;
    let plan = planner.run()?;
    let tree = planner.tree().stats();

    println!("{:<24}{:?}", "model", args.model);
    println!("{:<24}{:.6}", "estimated value", plan.value);
    println!("{:<24}{:.6}", "exact value", exact);
    println!("{:<24}{}", "recommended action", plan.action);
    println!("{:<24}{:?}", "surviving actions", plan.survivors);
    println!("{:<24}{}", "samples", plan.stats.samples);
    println!("{:<24}{}", "elimination rounds", plan.stats.rounds);
    println!("{:<24}{}", "max nodes", tree.node_count);
    println!("{:<24}{:.2}", "successor reuse", tree.reuse_ratio());
    println!("{:<24}{:.3}", "time (ms)", plan.stats.time_us as f64 / 1000.0);
    Ok(())
}
