use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tweet_swarm::data::model::Tweet;

const MONTHS: [&str; 6] = ["January", "February", "March", "April", "May", "June"];

const SUBJECTS: [&str; 6] = [
    "the new update",
    "this weather",
    "the match last night",
    "my commute",
    "the product launch",
    "the city council vote",
];

const POSITIVE: [&str; 4] = ["love", "really enjoyed", "can't stop smiling about", "am thrilled by"];
const NEGATIVE: [&str; 4] = ["hate", "am so tired of", "am disappointed by", "can't stand"];
const NEUTRAL: [&str; 3] = ["just read about", "noticed", "am following"];

#[derive(Debug, Parser)]
#[command(about = "Write a deterministic sample tweet dataset as JSON")]
struct Args {
    #[arg(default_value = "sample_tweets.json")]
    output: PathBuf,

    #[arg(long, default_value_t = 300)]
    count: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Seeded SplitMix64 stream; the same seed always yields the same dataset.
struct TweetRng(u64);

impl TweetRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Normal sample (Marsaglia polar method).
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        loop {
            let u = 2.0 * self.unit() - 1.0;
            let v = 2.0 * self.unit() - 1.0;
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                return mean + std_dev * u * (-2.0 * s.ln() / s).sqrt();
            }
        }
    }

    fn choose<'a>(&mut self, words: &[&'a str]) -> &'a str {
        words[(self.next_u64() % words.len() as u64) as usize]
    }
}

fn generate_tweet(month_index: usize, rng: &mut TweetRng) -> Tweet {
    // Mood drifts upward over the half-year.
    let mood = -0.3 + 0.12 * month_index as f64;
    let sentiment = rng.normal(mood, 0.4).clamp(-1.0, 1.0);
    let subjectivity = (0.2 + sentiment.abs() * 0.6 + rng.normal(0.0, 0.15)).clamp(0.0, 1.0);

    let verb = if sentiment > 0.15 {
        rng.choose(&POSITIVE)
    } else if sentiment < -0.15 {
        rng.choose(&NEGATIVE)
    } else {
        rng.choose(&NEUTRAL)
    };
    let subject = rng.choose(&SUBJECTS);

    Tweet {
        month: MONTHS[month_index].to_string(),
        sentiment,
        subjectivity,
        raw_tweet: format!("I {verb} {subject}"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = TweetRng(args.seed);

    let tweets: Vec<Tweet> = (0..args.count)
        .map(|i| {
            let month_index = i * MONTHS.len() / args.count.max(1);
            generate_tweet(month_index, &mut rng)
        })
        .collect();

    let json = serde_json::to_string_pretty(&tweets).context("serializing tweets")?;
    std::fs::write(&args.output, json)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "Wrote {} tweets across {} months to {}",
        tweets.len(),
        MONTHS.len(),
        args.output.display()
    );
    Ok(())
}
