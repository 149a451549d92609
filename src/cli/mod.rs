// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All quiz logic is delegated to Layer 2 (application) and the
// quiz engine; this layer loads inputs and prints results.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, GenerateArgs, GradeArgs, MatchArgs, ParseArgs, ScoreArgs};

use crate::application::{
    config::QuizConfig, generate_use_case::GenerateUseCase, score_use_case::ScoreUseCase,
};
use crate::data::{loader::{FileSource, InlineText}, story_loader::JsonStoryLoader};
use crate::domain::{question::{QuestionMix, QuestionRecord}, traits::DocumentSource};
use crate::infra::config_store::ConfigStore;
use crate::quiz::{corpus::ReferenceCorpus, grader::AnswerGrader, parser::QuizParser};

#[derive(Parser, Debug)]
#[command(
    name = "story-quiz",
    version = "0.1.0",
    about = "Generate quiz questions from stories, parse quiz text, and grade answers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route the subcommand to its handler. Routing only.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Generate(args) => run_generate(args),
            Commands::Parse(args)    => run_parse(args),
            Commands::Grade(args)    => run_grade(args),
            Commands::Score(args)    => run_score(args),
            Commands::Match(args)    => run_match(args),
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => ConfigStore::new(path).load()?,
        None       => QuizConfig::default(),
    };
    let cfg = args.overlay(base);
    if let Some(path) = &args.save_config {
        ConfigStore::new(path).save(&cfg)?;
        println!("Settings saved to {}", path.display());
    }

    let source: Box<dyn DocumentSource> = match (&args.text, &args.input) {
        (Some(text), _)    => Box::new(InlineText::new(text.clone())),
        (None, Some(path)) => Box::new(FileSource::new(path)),
        (None, None)       => anyhow::bail!("Give the source text with --text or --input"),
    };
    let document = source.load_document()?;
    tracing::info!("Language: {}", cfg.language);

    let corpus = ReferenceCorpus::load(&JsonStoryLoader::new(&cfg.dataset_dir))?;
    let model  = cfg.build_model()?;
    let mix    = QuestionMix::from(&args);

    let use_case = GenerateUseCase::new(model.as_ref(), cfg.prompt_budget(), &cfg);
    let outcome  = use_case.run(&document, &mix, &corpus)?;

    println!("{}", outcome.document.trim_end());
    println!();
    match &outcome.matched_story {
        Some(id) => println!(
            "Matched story '{}' ({} reference answers available for grading)",
            id,
            outcome.references.len()
        ),
        None => println!("No matching story found; answers will be graded by similarity."),
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.questions)?);
    }
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<()> {
    let document  = FileSource::new(&args.file).load_document()?;
    let questions = QuizParser::new().parse(&document.text);
    tracing::info!("Parsed {} questions from {}", questions.len(), document.source);
    println!("{}", serde_json::to_string_pretty(&questions)?);
    Ok(())
}

fn run_grade(args: GradeArgs) -> Result<()> {
    let score = AnswerGrader::new().grade(&args.answer, &args.reference);
    println!("Score: {:.3}", score);
    Ok(())
}

fn run_score(args: ScoreArgs) -> Result<()> {
    let questions: Vec<QuestionRecord> = read_json(&args.questions)?;
    let answers:   Vec<String>         = read_json(&args.answers)?;

    let references = match &args.source {
        Some(path) => {
            let text   = FileSource::new(path).load_document()?.text;
            let corpus = ReferenceCorpus::load(&JsonStoryLoader::new(&args.dataset_dir))?;
            let matched = corpus.find_similar_story(&text).map(|id| corpus.reference_answers(id));
            matched.unwrap_or_default()
        }
        None => Vec::new(),
    };

    let report = ScoreUseCase::new(references).score(&questions, &answers);
    for item in &report.items {
        let score = item.score.map_or_else(|| "ungraded".to_string(), |s| format!("{s:.2}"));
        let mark  = if item.correct { "✓" } else { "✗" };
        println!("{mark} {}. {} → {}", item.number, item.question, score);
    }
    println!(
        "\nCorrect: {}/{} ({:.1}%)",
        report.correct, report.total, report.percentage
    );
    Ok(())
}

fn run_match(args: MatchArgs) -> Result<()> {
    let text   = FileSource::new(&args.input).load_document()?.text;
    let corpus = ReferenceCorpus::load(&JsonStoryLoader::new(&args.dataset_dir))?;
    if !corpus.is_available() {
        println!("No reference stories found in {}", args.dataset_dir.display());
        return Ok(());
    }

    match corpus.find_similar_story(&text) {
        Some(id) => {
            println!("Matched story: {id}");
            println!("{}", serde_json::to_string_pretty(&corpus.reference_answers(id))?);
        }
        None => println!("No matching story found among {} stories", corpus.len()),
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid JSON in '{}'", path.display()))
}
