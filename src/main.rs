//! CommCoach CLI
//!
//! Command-line interface for the communication analysis engine.
//! Transcription is an external collaborator, so analyzing a recording
//! from the CLI requires the message text alongside the audio.

use clap::{Parser, Subcommand};
use commcoach::{
    AnalysisConfig, AnalysisOutcome, AnalysisReport, AnalysisRequest, CommunicationAnalyzer,
    Relationship, Result,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "commcoach",
    about = "Communication style analysis and coaching",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a message and/or a recording
    Analyze {
        /// Message text to analyze
        #[arg(short, long)]
        text: Option<String>,

        /// Audio recording to analyze (wav, mp3, m4a, mp4, ogg, flac)
        #[arg(short, long)]
        audio: Option<PathBuf>,

        /// Relationship category (boss, colleague, partner, family, friend)
        #[arg(short, long)]
        relationship: Option<String>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate default configuration file
    InitConfig {
        /// Output path for config file
        #[arg(short, long, default_value = "commcoach.yaml")]
        output: PathBuf,
    },

    /// Show information about the engine
    Info,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            text,
            audio,
            relationship,
            config,
            json,
        } => {
            let cfg = if let Some(path) = config {
                AnalysisConfig::load(path)?
            } else {
                AnalysisConfig::default()
            };

            let relationship = relationship.as_deref().and_then(|name| {
                let parsed = Relationship::parse(name);
                if parsed.is_none() {
                    log::warn!("unknown relationship category: {}", name);
                }
                parsed
            });

            let analyzer = CommunicationAnalyzer::new(cfg)?;
            let request = AnalysisRequest {
                text,
                audio_path: audio,
                relationship,
            };

            match analyzer.analyze(&request)? {
                AnalysisOutcome::NeedsInput(guidance) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&guidance)?);
                    } else {
                        println!("{}", guidance.message);
                        for option in &guidance.options {
                            println!("  - {}", option);
                        }
                        println!("{}", guidance.audio_tips);
                    }
                }
                AnalysisOutcome::Report(report) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    } else {
                        print_report(&report);
                    }
                }
            }
        }

        Commands::InitConfig { output } => {
            log::info!("Creating default configuration...");

            let config = AnalysisConfig::default();
            config.save(&output)?;

            println!("✓ Configuration saved to: {}", output.display());
        }

        Commands::Info => {
            println!("CommCoach - Communication Analysis Engine");
            println!("=========================================");
            println!("Version: {}", commcoach::VERSION);
            println!("Platform: {}", std::env::consts::OS);
            println!();
            println!("Features:");
            println!("  - Vocal delivery analysis (volume, pace, pitch, clarity, pauses)");
            println!("  - Pattern-based text style classification");
            println!("  - Audio/text signal fusion");
            println!("  - Deterministic coaching and message rewrites");
            println!();
            println!("Canonical sample rate: {} Hz", commcoach::SAMPLE_RATE);
            println!("Frame length: {}", commcoach::FRAME_LENGTH);
            println!("Hop length: {}", commcoach::HOP_LENGTH);
            println!("Accepted formats: wav, mp3, m4a, mp4, ogg, flac");
        }
    }

    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!("Style: {}", report.style_analysis.style);
    let s = &report.style_analysis.scores;
    println!(
        "Scores: tone {}/10, clarity {}/10, confidence {}/10, empathy {}/10, overall {}/10",
        s.tone, s.clarity, s.confidence, s.empathy, s.overall
    );

    if !report.style_analysis.issues.is_empty() {
        println!("\nIssues:");
        for issue in &report.style_analysis.issues {
            println!("  - {}", issue);
        }
    }
    if !report.style_analysis.strengths.is_empty() {
        println!("\nStrengths:");
        for strength in &report.style_analysis.strengths {
            println!("  - {}", strength);
        }
    }
    if !report.style_analysis.filler_words.is_empty() {
        println!(
            "\nFiller words: {}",
            report.style_analysis.filler_words.join(", ")
        );
    }

    if !report.coaching.is_empty() {
        println!("\nCoaching:");
        for (i, line) in report.coaching.iter().enumerate() {
            println!("  {}. {}", i + 1, line);
        }
    }

    if let Some(rewritten) = &report.rewritten_message {
        println!("\nOriginal: '{}'", report.original_message);
        println!("Try: '{}'", rewritten);
    }

    if !report.relationship_tip.is_empty() {
        println!("\nTip: {}", report.relationship_tip);
    }

    if let Some(vocal) = &report.vocal_analysis {
        println!("\nVocal analysis ({:.2} s):", vocal.duration_seconds);
        println!(
            "  Volume: {:?} ({}/10) - {}",
            vocal.volume.level, vocal.volume.score, vocal.volume.note
        );
        println!(
            "  Pace: {:?} at {:.2}/s ({}/10) - {}",
            vocal.pace.level, vocal.pace.rate_per_sec, vocal.pace.score, vocal.pace.note
        );
        println!(
            "  Pitch: {:?}, {:?} ({}/10) - {}",
            vocal.pitch.level, vocal.pitch.variety, vocal.pitch.score, vocal.pitch.note
        );
        println!(
            "  Clarity: {:?} ({}/10) - {}",
            vocal.clarity.level, vocal.clarity.score, vocal.clarity.note
        );
        println!(
            "  Pauses: {:?} averaging {:.2} s ({}/10) - {}",
            vocal.pauses.level, vocal.pauses.average_seconds, vocal.pauses.score, vocal.pauses.note
        );
        println!("  Confidence: {}/10", vocal.confidence_score);
        println!("  Emotional tone: {}", vocal.emotional_tone.label());
        println!("  Overall vocal score: {}/10", vocal.overall_score);
    }

    println!("\n✓ Analysis complete");
}
