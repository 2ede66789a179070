//! Command implementations for mathpulsectl

use anyhow::{bail, Context, Result};
use mathpulse_common::error::read_json_file;
use mathpulse_common::{
    daily_insight, fallback_response, ClassMember, HttpInferenceClient, InferenceClient,
    LearningPathRequest, LearningPathService, MathPulseConfig, Message, RiskPredictionService,
    StudentProfile, TutorService,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

fn client(config: &MathPulseConfig) -> Result<Arc<dyn InferenceClient>> {
    let client = HttpInferenceClient::new(config.inference.clone())?;
    Ok(Arc::new(client))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{}", text);
    Ok(())
}

fn load_json<T: serde::de::DeserializeOwned>(file: &Path) -> Result<T> {
    read_json_file(file).with_context(|| format!("Failed to load {}", file.display()))
}

/// Reply to `message`, with the conversation read from `history` when given
pub fn answer(
    config: Option<&Path>,
    message: &str,
    history: Option<&Path>,
    offline: bool,
) -> Result<String> {
    if message.trim().is_empty() {
        bail!("Message must not be empty");
    }

    let history: Vec<Message> = match history {
        Some(file) => load_json(file)?,
        None => Vec::new(),
    };

    if offline {
        debug!("Offline mode, answering with the fallback engine");
        return Ok(fallback_response(message, &history));
    }

    let config = MathPulseConfig::load(config)?;
    let tutor = TutorService::new(
        client(&config)?,
        config.inference.chat_model.clone(),
        config.tutor.clone(),
    );
    let reply = tutor.respond(message, &history);
    debug!("Reply source: {:?}", reply.source);
    Ok(reply.message)
}

/// Ask the tutor, printing the reply as plain text
pub fn ask(config: Option<&Path>, message: &str, history: Option<&Path>, offline: bool) -> Result<()> {
    println!("{}", answer(config, message, history, offline)?);
    Ok(())
}

/// Effective configuration as TOML, with the API token masked
pub fn config_toml(config: Option<&Path>) -> Result<String> {
    let mut config = MathPulseConfig::load(config)?;
    if config.inference.api_token.is_some() {
        config.inference.api_token = Some("***".to_string());
    }
    config.to_toml()
}

pub fn show_config(config: Option<&Path>) -> Result<()> {
    print!("{}", config_toml(config)?);
    Ok(())
}

pub fn risk(config: Option<&Path>, file: &Path) -> Result<()> {
    let student: StudentProfile = load_json(file)?;
    let config = MathPulseConfig::load(config)?;
    let service = RiskPredictionService::new(
        client(&config)?,
        config.inference.classification_model.clone(),
    );
    print_json(&service.predict(&student))
}

pub fn path(config: Option<&Path>, file: &Path) -> Result<()> {
    let request: LearningPathRequest = load_json(file)?;
    let config = MathPulseConfig::load(config)?;
    let service = LearningPathService::new(client(&config)?, config.inference.chat_model.clone());
    print_json(&service.generate(&request))
}

pub fn insight(file: &Path) -> Result<()> {
    let students: Vec<ClassMember> = load_json(file)?;
    print_json(&daily_insight(&students))
}
