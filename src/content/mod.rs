//! # Content Store
//!
//! Static, read-only page content: topic texts, FAQ entries, contact channels,
//! the subdomain directory and the API code samples.
//!
//! ## Overview
//!
//! A [`ContentStore`] is built once at startup and never mutated afterwards.
//! Rendering code borrows from it; search never rewrites it, only the
//! highlighted projection produced from it.
//!
//! Topic texts may embed a small set of trusted author markup (`<a>`,
//! `<strong>`, `<ul>`/`<li>`, `<br>`). This content is fixed at build time and
//! is not sanitized.

pub mod api;
mod data;

use anyhow::Result;
use std::fmt;

/// A question/answer pair shown in the FAQ section.
///
/// Entries have no identity beyond their position in [`ContentStore::faqs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Named topic texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicId {
    General,
    DomainServices,
    Registration,
    Guides,
    ApiDescription,
    ApiInstructions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub text: String,
}

/// A way to reach the support team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub label: String,
    pub display: String,
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdomainStatus {
    Active,
    Maintenance,
    Inactive,
}

impl SubdomainStatus {
    pub fn label(self) -> &'static str {
        match self {
            SubdomainStatus::Active => "active",
            SubdomainStatus::Maintenance => "maintenance",
            SubdomainStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for SubdomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An entry of the Dovuchcha subdomain directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subdomain {
    pub name: String,
    pub purpose: String,
    pub status: SubdomainStatus,
}

/// Language of a code sample, used for syntax colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    Json,
}

impl Language {
    pub fn name(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Json => "json",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Json => "JSON",
        }
    }
}

/// A fixed code snippet shown in the API Reference section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSample {
    /// Caption shown above the block, e.g. "Example Request".
    pub caption: String,
    pub language: Language,
    pub source: String,
}

/// All content of the support page.
#[derive(Debug, Clone)]
pub struct ContentStore {
    pub title: String,
    topics: Vec<Topic>,
    faqs: Vec<FaqEntry>,
    contacts: Vec<Contact>,
    subdomains: Vec<Subdomain>,
    code_samples: Vec<CodeSample>,
}

impl ContentStore {
    /// Assemble a store from parts. Missing topics read as empty text.
    pub fn new(
        title: impl Into<String>,
        topics: Vec<Topic>,
        faqs: Vec<FaqEntry>,
        code_samples: Vec<CodeSample>,
    ) -> Self {
        Self {
            title: title.into(),
            topics,
            faqs,
            contacts: Vec::new(),
            subdomains: Vec::new(),
            code_samples,
        }
    }

    /// The Dovuchcha support page content.
    pub fn builtin() -> Result<Self> {
        let topic = |id, text: &str| Topic {
            id,
            text: text.to_string(),
        };

        let topics = vec![
            topic(TopicId::General, data::GENERAL),
            topic(TopicId::DomainServices, data::DOMAIN_SERVICES),
            topic(TopicId::Registration, data::REGISTRATION),
            topic(TopicId::Guides, data::GUIDES),
            topic(TopicId::ApiDescription, data::API_DESCRIPTION),
            topic(TopicId::ApiInstructions, data::API_INSTRUCTIONS),
        ];

        let faqs = data::FAQS
            .iter()
            .map(|(question, answer)| FaqEntry::new(*question, *answer))
            .collect();

        let code_samples = vec![
            CodeSample {
                caption: "Example Request".to_string(),
                language: Language::JavaScript,
                source: api::sample_request_js(),
            },
            CodeSample {
                caption: "Example Response".to_string(),
                language: Language::Json,
                source: api::sample_response_json()?,
            },
        ];

        let mut store = Self::new(data::SITE_TITLE, topics, faqs, code_samples);
        store.contacts = data::contacts();
        store.subdomains = data::subdomains();
        Ok(store)
    }

    pub fn topic(&self, id: TopicId) -> &str {
        self.topics
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.text.as_str())
            .unwrap_or_default()
    }

    pub fn faqs(&self) -> &[FaqEntry] {
        &self.faqs
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn subdomains(&self) -> &[Subdomain] {
        &self.subdomains
    }

    pub fn code_samples(&self) -> &[CodeSample] {
        &self.code_samples
    }
}
