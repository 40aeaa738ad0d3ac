//! Static declaration of the daily pipeline the market-force stage belongs to.
//!
//! The graph is plain data handed to an external scheduler; nothing here
//! runs the stages.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageKind {
    /// Shell invocation of an external script, run from the process directory.
    Process { command: String },
    /// Marks that a stage has published its table.
    Checkpoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub id: String,
    pub kind: StageKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    Daily,
}

/// Task defaults the scheduler applies to every stage.
#[derive(Debug, Clone, Serialize)]
pub struct DefaultTaskArgs {
    pub owner: String,
    pub depends_on_past: bool,
    pub start_date: NaiveDate,
    pub email: Vec<String>,
    pub email_on_failure: bool,
    pub email_on_retry: bool,
    pub retries: u32,
    pub retry_delay_secs: u64,
    pub catchup: bool,
    pub schedule: Schedule,
}

impl Default for DefaultTaskArgs {
    fn default() -> Self {
        Self {
            owner: "reading-machine".into(),
            depends_on_past: false,
            start_date: NaiveDate::from_ymd_opt(2018, 4, 20).unwrap_or_default(),
            email: Vec::new(),
            email_on_failure: true,
            email_on_retry: false,
            retries: 3,
            retry_delay_secs: 60,
            catchup: false,
            schedule: Schedule::Daily,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineGraph {
    pub name: String,
    pub default_args: DefaultTaskArgs,
    pub stages: Vec<Stage>,
    /// `(upstream, downstream)`
    pub edges: Vec<(String, String)>,
}

fn process(id: &str) -> Stage {
    Stage {
        id: id.into(),
        kind: StageKind::Process {
            command: format!("python {id}/processor.py"),
        },
    }
}

fn checkpoint(id: &str) -> Stage {
    Stage {
        id: id.into(),
        kind: StageKind::Checkpoint,
    }
}

impl PipelineGraph {
    /// The daily news-to-market-force pipeline.
    pub fn reading_machine() -> Self {
        let stages = vec![
            process("article_scraper"),
            checkpoint("db_raw_article"),
            process("article_processing"),
            checkpoint("db_processed_article"),
            process("price_extraction"),
            checkpoint("db_raw_price"),
            process("sentiment_scoring"),
            checkpoint("db_sentiment_scoring"),
            process("topic_modelling"),
            checkpoint("db_topic_modelling"),
            process("data_harmonisation"),
            checkpoint("db_data_harmonisation"),
            process("compute_market_force"),
        ];
        let edges = [
            ("article_scraper", "db_raw_article"),
            ("price_extraction", "db_raw_price"),
            ("db_raw_article", "article_processing"),
            ("article_processing", "db_processed_article"),
            ("db_processed_article", "sentiment_scoring"),
            ("db_processed_article", "topic_modelling"),
            ("sentiment_scoring", "db_sentiment_scoring"),
            ("topic_modelling", "db_topic_modelling"),
            ("db_sentiment_scoring", "data_harmonisation"),
            ("db_topic_modelling", "data_harmonisation"),
            ("data_harmonisation", "db_data_harmonisation"),
            ("db_data_harmonisation", "compute_market_force"),
        ]
        .into_iter()
        .map(|(up, down)| (up.to_string(), down.to_string()))
        .collect();

        Self {
            name: "the_reading_machine".into(),
            default_args: DefaultTaskArgs::default(),
            stages,
            edges,
        }
    }

    pub fn stage(&self, id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id)
    }

    /// Direct dependencies of `id`, in edge declaration order.
    pub fn upstream_of(&self, id: &str) -> Result<Vec<&str>, DomainError> {
        if self.stage(id).is_none() {
            return Err(DomainError::NotFound(format!("Stage not found: {id}")));
        }
        Ok(self
            .edges
            .iter()
            .filter(|(_, down)| down == id)
            .map(|(up, _)| up.as_str())
            .collect())
    }

    /// Execution order. Among ready stages the earliest declared goes first.
    pub fn topological_order(&self) -> Result<Vec<&str>, DomainError> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        for (i, stage) in self.stages.iter().enumerate() {
            if index.insert(stage.id.as_str(), i).is_some() {
                return Err(DomainError::InvalidInput(format!("Duplicate stage: {}", stage.id)));
            }
        }

        let mut in_degree = vec![0usize; self.stages.len()];
        let mut downstream: Vec<Vec<usize>> = vec![Vec::new(); self.stages.len()];
        for (up, down) in &self.edges {
            let (Some(&u), Some(&d)) = (index.get(up.as_str()), index.get(down.as_str())) else {
                return Err(DomainError::InvalidInput(format!(
                    "Edge {up} -> {down} references an unknown stage"
                )));
            };
            in_degree[d] += 1;
            downstream[u].push(d);
        }

        let mut done: HashSet<usize> = HashSet::new();
        let mut order = Vec::with_capacity(self.stages.len());
        while order.len() < self.stages.len() {
            let Some(next) = (0..self.stages.len()).find(|i| !done.contains(i) && in_degree[*i] == 0) else {
                let stuck: Vec<&str> = (0..self.stages.len())
                    .filter(|i| !done.contains(i))
                    .map(|i| self.stages[i].id.as_str())
                    .collect();
                return Err(DomainError::InvalidInput(format!(
                    "Pipeline has a cycle through: {}",
                    stuck.join(", ")
                )));
            };
            done.insert(next);
            order.push(self.stages[next].id.as_str());
            for &d in &downstream[next] {
                in_degree[d] -= 1;
            }
        }
        Ok(order)
    }
}
