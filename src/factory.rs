//! Choosing a rule-config parser from a file's extension.
//!
//! Three selection strategies produce the same parser for the same filename:
//! an inline `if / else if` chain, a simple factory, and a factory method
//! (a registry of per-format factories).

use thiserror::Error;

// =============================================================================
// Milestone 1: Parsers and the format tag
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("no parser for extension of '{filename}'")]
    UnsupportedExtension { filename: String },
}

impl ParserError {
    pub fn unsupported(filename: impl Into<String>) -> Self {
        Self::UnsupportedExtension {
            filename: filename.into(),
        }
    }
}

/// Rules parsed from a config file. Nothing is actually read, so it is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    Json,
    Xml,
    Yaml,
}

impl ConfigFormat {
    /// Checked in this order by every selection strategy.
    pub const ALL: [ConfigFormat; 3] = [ConfigFormat::Json, ConfigFormat::Xml, ConfigFormat::Yaml];

    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Xml => "xml",
            ConfigFormat::Yaml => "yaml",
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| has_extension(filename, format.extension()))
    }
}

/// Case-sensitive suffix test: `has_extension("a.json", "json")` but not `"a.JSON"`.
pub fn has_extension(filename: &str, extension: &str) -> bool {
    filename
        .strip_suffix(extension)
        .is_some_and(|stem| stem.ends_with('.'))
}

pub trait RuleConfigParser {
    /// Family tag, e.g. `"json"`.
    fn name(&self) -> &'static str;

    fn trace_message(&self) -> String {
        format!("parse {} file.", self.name())
    }

    fn parse(&self, filename: &str) -> RuleConfig {
        tracing::info!(parser = self.name(), file = filename, "{}", self.trace_message());
        RuleConfig
    }
}

#[derive(Debug, Default)]
pub struct JsonRuleConfigParser;

impl RuleConfigParser for JsonRuleConfigParser {
    fn name(&self) -> &'static str {
        "json"
    }
}

#[derive(Debug, Default)]
pub struct XmlRuleConfigParser;

impl RuleConfigParser for XmlRuleConfigParser {
    fn name(&self) -> &'static str {
        "xml"
    }
}

#[derive(Debug, Default)]
pub struct YamlRuleConfigParser;

impl RuleConfigParser for YamlRuleConfigParser {
    fn name(&self) -> &'static str {
        "yaml"
    }
}

// =============================================================================
// Milestone 2: Inline conditional dispatch
// =============================================================================

/// The chain a caller would otherwise write in place.
pub fn select_by_extension(filename: &str) -> Result<Box<dyn RuleConfigParser>, ParserError> {
    if has_extension(filename, "json") {
        Ok(Box::new(JsonRuleConfigParser))
    } else if has_extension(filename, "xml") {
        Ok(Box::new(XmlRuleConfigParser))
    } else if has_extension(filename, "yaml") {
        Ok(Box::new(YamlRuleConfigParser))
    } else {
        Err(ParserError::unsupported(filename))
    }
}

// =============================================================================
// Milestone 3: Simple factory
// =============================================================================

/// All creation logic in one place. A new format means editing `create_parser`,
/// which is acceptable while formats are added rarely.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleParserFactory;

impl SimpleParserFactory {
    pub fn create_parser(&self, filename: &str) -> Result<Box<dyn RuleConfigParser>, ParserError> {
        let parser: Box<dyn RuleConfigParser> = match ConfigFormat::from_filename(filename) {
            Some(ConfigFormat::Json) => Box::new(JsonRuleConfigParser),
            Some(ConfigFormat::Xml) => Box::new(XmlRuleConfigParser),
            Some(ConfigFormat::Yaml) => Box::new(YamlRuleConfigParser),
            None => return Err(ParserError::unsupported(filename)),
        };
        tracing::debug!(file = filename, parser = parser.name(), "simple factory selected parser");
        Ok(parser)
    }
}

// =============================================================================
// Milestone 4: Factory method (factory of factories)
// =============================================================================

pub trait ParserFactory {
    fn create_parser(&self) -> Box<dyn RuleConfigParser>;
}

#[derive(Debug, Default)]
pub struct JsonParserFactory;

impl ParserFactory for JsonParserFactory {
    fn create_parser(&self) -> Box<dyn RuleConfigParser> {
        Box::new(JsonRuleConfigParser)
    }
}

#[derive(Debug, Default)]
pub struct XmlParserFactory;

impl ParserFactory for XmlParserFactory {
    fn create_parser(&self) -> Box<dyn RuleConfigParser> {
        Box::new(XmlRuleConfigParser)
    }
}

#[derive(Debug, Default)]
pub struct YamlParserFactory;

impl ParserFactory for YamlParserFactory {
    fn create_parser(&self) -> Box<dyn RuleConfigParser> {
        Box::new(YamlRuleConfigParser)
    }
}

/// Maps an extension to the factory for its format.
///
/// Supporting a new format is a new `ParserFactory` plus one `register` call;
/// the lookup below never changes. Extensions are tried in registration order.
pub struct ParserFactoryRegistry {
    factories: Vec<(String, Box<dyn ParserFactory>)>,
}

impl ParserFactoryRegistry {
    /// Registry with the json, xml and yaml factories.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(ConfigFormat::Json.extension(), Box::new(JsonParserFactory));
        registry.register(ConfigFormat::Xml.extension(), Box::new(XmlParserFactory));
        registry.register(ConfigFormat::Yaml.extension(), Box::new(YamlParserFactory));
        registry
    }

    pub fn empty() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    pub fn register(&mut self, extension: impl Into<String>, factory: Box<dyn ParserFactory>) {
        self.factories.push((extension.into(), factory));
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.factories.iter().map(|(ext, _)| ext.as_str())
    }

    pub fn factory_for(&self, filename: &str) -> Result<&dyn ParserFactory, ParserError> {
        self.factories
            .iter()
            .find(|(ext, _)| has_extension(filename, ext))
            .map(|(_, factory)| factory.as_ref())
            .ok_or_else(|| ParserError::unsupported(filename))
    }

    pub fn create_parser(&self, filename: &str) -> Result<Box<dyn RuleConfigParser>, ParserError> {
        let parser = self.factory_for(filename)?.create_parser();
        tracing::debug!(file = filename, parser = parser.name(), "factory method selected parser");
        Ok(parser)
    }
}

impl Default for ParserFactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub fn new_rule_config_parser(filename: &str) -> Result<Box<dyn RuleConfigParser>, ParserError> {
    ParserFactoryRegistry::new().create_parser(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    fn all_strategies(filename: &str) -> Vec<Result<&'static str, ParserError>> {
        vec![
            select_by_extension(filename).map(|p| p.name()),
            SimpleParserFactory.create_parser(filename).map(|p| p.name()),
            new_rule_config_parser(filename).map(|p| p.name()),
        ]
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension("test.json", "json"));
        assert!(has_extension("archive.tar.yaml", "yaml"));
        assert!(!has_extension("test.JSON", "json"));
        assert!(!has_extension("json", "json"));
        assert!(!has_extension("testjson", "json"));
        assert!(!has_extension("test.json.bak", "json"));
    }

    #[test]
    fn test_format_from_filename() {
        assert_eq!(ConfigFormat::from_filename("a.json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_filename("a.xml"), Some(ConfigFormat::Xml));
        assert_eq!(ConfigFormat::from_filename("a.yaml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_filename("a.yml"), None);
        assert_eq!(ConfigFormat::from_filename(""), None);
    }

    #[test]
    fn test_every_strategy_picks_the_right_family() {
        for format in ConfigFormat::ALL {
            let filename = format!("test.{}", format.extension());
            for result in all_strategies(&filename) {
                assert_eq!(result, Ok(format.extension()));
            }
        }
    }

    #[test]
    fn test_unmatched_extension_is_an_error_everywhere() {
        for result in all_strategies("test.txt") {
            assert_eq!(result, Err(ParserError::unsupported("test.txt")));
        }
    }

    #[test]
    fn test_strategies_agree() {
        let filenames = [
            "rules.json",
            "rules.xml",
            "rules.yaml",
            "rules.YAML",
            "rules.properties",
            "noextension",
            ".json",
            "",
        ];
        for filename in filenames {
            let results = all_strategies(filename);
            assert!(
                results.windows(2).all(|pair| pair[0] == pair[1]),
                "strategies disagree for {filename:?}: {results:?}"
            );
        }
    }

    #[test]
    fn test_parse_returns_empty_config() {
        let parser = select_by_extension("test.xml").unwrap();
        assert_eq!(parser.parse("test.xml"), RuleConfig);
        assert_eq!(parser.trace_message(), "parse xml file.");
    }

    #[test]
    fn test_parse_never_fails() {
        let parser = JsonRuleConfigParser;
        assert_eq!(parser.parse(""), RuleConfig);
        assert_eq!(parser.parse("does/not/exist.json"), RuleConfig);
    }

    #[test]
    fn test_error_message() {
        let err = ParserError::unsupported("test.txt");
        assert_eq!(err.to_string(), "no parser for extension of 'test.txt'");
    }

    struct PropertiesRuleConfigParser;

    impl RuleConfigParser for PropertiesRuleConfigParser {
        fn name(&self) -> &'static str {
            "properties"
        }
    }

    struct PropertiesParserFactory;

    impl ParserFactory for PropertiesParserFactory {
        fn create_parser(&self) -> Box<dyn RuleConfigParser> {
            Box::new(PropertiesRuleConfigParser)
        }
    }

    #[test]
    fn test_registry_extends_without_touching_dispatch() {
        let mut registry = ParserFactoryRegistry::new();
        assert!(registry.create_parser("app.properties").is_err());

        registry.register("properties", Box::new(PropertiesParserFactory));
        let parser = registry.create_parser("app.properties").unwrap();
        assert_eq!(parser.name(), "properties");
        assert_eq!(parser.trace_message(), "parse properties file.");

        // Existing formats are unaffected.
        assert_eq!(registry.create_parser("app.json").unwrap().name(), "json");

        // The simple factory has to be edited to learn a new format.
        assert!(SimpleParserFactory.create_parser("app.properties").is_err());
    }

    #[test]
    fn test_registry_order_and_lookup() {
        let registry = ParserFactoryRegistry::default();
        let extensions: Vec<&str> = registry.extensions().collect();
        assert_eq!(extensions, vec!["json", "xml", "yaml"]);

        let factory = registry.factory_for("a.yaml").unwrap();
        assert_eq!(factory.create_parser().name(), "yaml");
        assert!(registry.factory_for("a.txt").is_err());
    }

    #[test]
    fn test_empty_registry_matches_nothing() {
        let registry = ParserFactoryRegistry::empty();
        assert_eq!(registry.extensions().count(), 0);
        assert!(registry.create_parser("a.json").is_err());
    }

    #[test]
    fn test_new_and_default_registries_agree() {
        let from_new: Vec<String> = ParserFactoryRegistry::new().extensions().map(String::from).collect();
        let from_default: Vec<String> =
            ParserFactoryRegistry::default().extensions().map(String::from).collect();
        assert_eq!(from_new, from_default);
        assert_eq!(from_new, vec!["json", "xml", "yaml"]);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn parse_and_capture(parser: &dyn RuleConfigParser, filename: &str) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            parser.parse(filename);
        });
        logs.contents()
    }

    #[test]
    fn test_parse_event_names_the_family() {
        for format in ConfigFormat::ALL {
            let filename = format!("rules.{}", format.extension());
            let selected = [
                select_by_extension(&filename).unwrap(),
                SimpleParserFactory.create_parser(&filename).unwrap(),
                new_rule_config_parser(&filename).unwrap(),
            ];

            for parser in &selected {
                let output = parse_and_capture(parser.as_ref(), &filename);
                assert!(
                    output.contains(&format!("parse {} file.", format.extension())),
                    "unexpected trace for {filename}: {output}"
                );
                assert!(output.contains(&filename), "file missing from trace: {output}");
                for other in ConfigFormat::ALL.into_iter().filter(|f| *f != format) {
                    assert!(!output.contains(&format!("parse {} file.", other.extension())));
                }
            }
        }
    }
}
