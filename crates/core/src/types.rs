//! Core value types for OXTest commands

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Canonical command kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandType {
    Navigate,
    GoBack,
    GoForward,
    Reload,
    Click,
    #[serde(rename = "dblclick")]
    DblClick,
    Fill,
    Type,
    Press,
    Hover,
    Focus,
    Blur,
    Clear,
    Check,
    Uncheck,
    SelectOption,
    Wait,
    WaitForSelector,
    Screenshot,
    SetViewport,
    AssertVisible,
    AssertHidden,
    AssertText,
    AssertValue,
    AssertEnabled,
    AssertDisabled,
    AssertChecked,
    AssertUnchecked,
    AssertUrl,
    AssertTitle,
    AssertCount,
    Log,
}

impl CommandType {
    pub const ALL: [CommandType; 32] = [
        CommandType::Navigate,
        CommandType::GoBack,
        CommandType::GoForward,
        CommandType::Reload,
        CommandType::Click,
        CommandType::DblClick,
        CommandType::Fill,
        CommandType::Type,
        CommandType::Press,
        CommandType::Hover,
        CommandType::Focus,
        CommandType::Blur,
        CommandType::Clear,
        CommandType::Check,
        CommandType::Uncheck,
        CommandType::SelectOption,
        CommandType::Wait,
        CommandType::WaitForSelector,
        CommandType::Screenshot,
        CommandType::SetViewport,
        CommandType::AssertVisible,
        CommandType::AssertHidden,
        CommandType::AssertText,
        CommandType::AssertValue,
        CommandType::AssertEnabled,
        CommandType::AssertDisabled,
        CommandType::AssertChecked,
        CommandType::AssertUnchecked,
        CommandType::AssertUrl,
        CommandType::AssertTitle,
        CommandType::AssertCount,
        CommandType::Log,
    ];

    /// Canonical (camelCase) name
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Navigate => "navigate",
            CommandType::GoBack => "goBack",
            CommandType::GoForward => "goForward",
            CommandType::Reload => "reload",
            CommandType::Click => "click",
            CommandType::DblClick => "dblclick",
            CommandType::Fill => "fill",
            CommandType::Type => "type",
            CommandType::Press => "press",
            CommandType::Hover => "hover",
            CommandType::Focus => "focus",
            CommandType::Blur => "blur",
            CommandType::Clear => "clear",
            CommandType::Check => "check",
            CommandType::Uncheck => "uncheck",
            CommandType::SelectOption => "selectOption",
            CommandType::Wait => "wait",
            CommandType::WaitForSelector => "waitForSelector",
            CommandType::Screenshot => "screenshot",
            CommandType::SetViewport => "setViewport",
            CommandType::AssertVisible => "assertVisible",
            CommandType::AssertHidden => "assertHidden",
            CommandType::AssertText => "assertText",
            CommandType::AssertValue => "assertValue",
            CommandType::AssertEnabled => "assertEnabled",
            CommandType::AssertDisabled => "assertDisabled",
            CommandType::AssertChecked => "assertChecked",
            CommandType::AssertUnchecked => "assertUnchecked",
            CommandType::AssertUrl => "assertUrl",
            CommandType::AssertTitle => "assertTitle",
            CommandType::AssertCount => "assertCount",
            CommandType::Log => "log",
        }
    }

    /// Whether the command acts on an element and therefore needs a selector
    pub fn requires_selector(&self) -> bool {
        matches!(
            self,
            CommandType::Click
                | CommandType::DblClick
                | CommandType::Fill
                | CommandType::Type
                | CommandType::Hover
                | CommandType::Focus
                | CommandType::Blur
                | CommandType::Clear
                | CommandType::Check
                | CommandType::Uncheck
                | CommandType::SelectOption
                | CommandType::WaitForSelector
                | CommandType::AssertVisible
                | CommandType::AssertHidden
                | CommandType::AssertText
                | CommandType::AssertValue
                | CommandType::AssertEnabled
                | CommandType::AssertDisabled
                | CommandType::AssertChecked
                | CommandType::AssertUnchecked
                | CommandType::AssertCount
        )
    }

    /// Parameters that must be present for this command
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            CommandType::Navigate => &["url"],
            CommandType::Fill => &["value"],
            _ => &[],
        }
    }
}

impl FromStr for CommandType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| format!("unknown command: {}", s))
    }
}

impl std::fmt::Display for CommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a selector locates an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorStrategy {
    Css,
    Xpath,
    Text,
    Placeholder,
    Label,
    Role,
    Testid,
}

impl SelectorStrategy {
    pub const ALL: [SelectorStrategy; 7] = [
        SelectorStrategy::Css,
        SelectorStrategy::Xpath,
        SelectorStrategy::Text,
        SelectorStrategy::Placeholder,
        SelectorStrategy::Label,
        SelectorStrategy::Role,
        SelectorStrategy::Testid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorStrategy::Css => "css",
            SelectorStrategy::Xpath => "xpath",
            SelectorStrategy::Text => "text",
            SelectorStrategy::Placeholder => "placeholder",
            SelectorStrategy::Label => "label",
            SelectorStrategy::Role => "role",
            SelectorStrategy::Testid => "testid",
        }
    }
}

impl FromStr for SelectorStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SelectorStrategy::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| format!("unknown selector strategy: {}", s))
    }
}

impl std::fmt::Display for SelectorStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An element locator plus the alternatives to try when it misses.
///
/// `fallbacks` is always flat: a fallback never carries fallbacks of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSpec {
    pub strategy: SelectorStrategy,
    pub value: String,
    #[serde(default)]
    pub fallbacks: Vec<SelectorSpec>,
}

impl SelectorSpec {
    pub fn new(strategy: SelectorStrategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
            fallbacks: Vec::new(),
        }
    }

    pub fn with_fallback(mut self, fallback: SelectorSpec) -> Self {
        self.fallbacks.push(fallback);
        self
    }

    /// The primary selector followed by each fallback, in the order an
    /// executor should try them
    pub fn candidates(&self) -> impl Iterator<Item = &SelectorSpec> {
        std::iter::once(self).chain(self.fallbacks.iter())
    }
}

/// One parsed OXTest instruction.
///
/// Only the parser builds these, so a `Command` always satisfies the
/// selector and parameter requirements of its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    #[serde(rename = "type")]
    command_type: CommandType,
    params: BTreeMap<String, String>,
    selector: Option<SelectorSpec>,
}

impl Command {
    pub(crate) fn new(
        command_type: CommandType,
        params: BTreeMap<String, String>,
        selector: Option<SelectorSpec>,
    ) -> Self {
        Self {
            command_type,
            params,
            selector,
        }
    }

    pub fn command_type(&self) -> CommandType {
        self.command_type
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn selector(&self) -> Option<&SelectorSpec> {
        self.selector.as_ref()
    }
}
