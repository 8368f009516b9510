//! Linter driver: file discovery, validation, and correction passes.

use crate::config::Config;
use crate::correction::CorrectionError;
use crate::rule::{Rule, RuleBox};
use crate::source::SourceFile;
use crate::types::{Correction, CorrectionReport, LintResult, PersistFailure, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while linting.
#[derive(Debug, Error)]
pub enum LinterError {
    /// IO error while discovering files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),
}

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
}

impl LinterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory or file to lint.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the linter.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the linter.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules to the linter.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the linter.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved.
    pub fn build(self) -> Result<Linter, LinterError> {
        let config = self.config.unwrap_or_default();
        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        Ok(Linter {
            root,
            rules: self.rules,
            exclude_patterns,
            config,
        })
    }
}

/// Runs a list of rules over every source file under a root.
///
/// Use [`Linter::builder()`] to construct an instance.
pub struct Linter {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Config,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the root being linted.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the rules this linter runs, in order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates every discovered file.
    ///
    /// Files that cannot be read are skipped with a warning. Violations are
    /// sorted by file, then by offset.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails.
    pub fn lint(&self) -> Result<LintResult, LinterError> {
        info!("Starting lint at {}", self.root.display());

        let files = self.discover_files()?;
        info!("Found {} files to lint", files.len());

        let mut result = LintResult::new();
        for path in &files {
            let file = match SourceFile::read(path) {
                Ok(file) => file,
                Err(e) => {
                    warn!("{e}");
                    continue;
                }
            };
            result.violations.extend(self.lint_file(&file));
            result.files_checked += 1;
        }

        result.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.offset.cmp(&b.location.offset))
        });

        info!(
            "Lint complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Validates a single source unit with every rule.
    #[must_use]
    pub fn lint_file(&self, file: &SourceFile) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in &self.rules {
            let identifier = rule.description().identifier;
            let found = rule.validate(file);
            if !found.is_empty() {
                debug!("{identifier}: {} violation(s)", found.len());
            }
            violations.extend(self.apply_severity_override(identifier, found));
        }
        violations
    }

    /// Runs every correctable rule over every discovered file.
    ///
    /// A file whose corrected contents cannot be written back is recorded in
    /// [`CorrectionReport::failures`] and the run continues with the next
    /// file.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails.
    pub fn correct(&self) -> Result<CorrectionReport, LinterError> {
        info!("Starting autocorrect at {}", self.root.display());

        let files = self.discover_files()?;
        let mut report = CorrectionReport::new();

        for path in &files {
            let mut file = match SourceFile::read(path) {
                Ok(file) => file,
                Err(e) => {
                    warn!("{e}");
                    continue;
                }
            };
            report.files_checked += 1;

            let mut corrections = Vec::new();
            let outcome = self.correct_into(&mut file, &mut corrections);
            if !corrections.is_empty() {
                report.files_corrected += 1;
            }
            report.corrections.extend(corrections);
            if let Err(e) = outcome {
                warn!("{e}");
                report.failures.push(PersistFailure {
                    file: path.clone(),
                    message: e.to_string(),
                });
            }
        }

        info!("{}", report.summary());
        Ok(report)
    }

    /// Runs every correctable rule over a single source unit, in rule order.
    ///
    /// Each rule sees the text left by the rules before it.
    ///
    /// # Errors
    ///
    /// Returns the first [`CorrectionError`]; rules after the failing one do
    /// not run.
    pub fn correct_file(&self, file: &mut SourceFile) -> Result<Vec<Correction>, CorrectionError> {
        let mut corrections = Vec::new();
        self.correct_into(file, &mut corrections)?;
        Ok(corrections)
    }

    /// Collects corrections from each rule until one fails to persist.
    fn correct_into(
        &self,
        file: &mut SourceFile,
        corrections: &mut Vec<Correction>,
    ) -> Result<(), CorrectionError> {
        for rule in &self.rules {
            let Some(correctable) = rule.as_correctable() else {
                continue;
            };
            let applied = correctable.correct(file)?;
            if !applied.is_empty() {
                debug!(
                    "{}: {} correction(s)",
                    rule.description().identifier,
                    applied.len()
                );
            }
            corrections.extend(applied);
        }
        Ok(())
    }

    fn apply_severity_override(
        &self,
        identifier: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(identifier) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers the source files to lint, in path order.
    fn discover_files(&self) -> Result<Vec<PathBuf>, LinterError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut files = Vec::new();
        for extension in &self.config.analyzer.extensions {
            let pattern = format!("{}/**/*.{extension}", self.root.display());
            for entry in glob::glob(&pattern)? {
                let path = entry.map_err(|e| LinterError::Io(e.into()))?;
                if self.should_exclude(&path) {
                    debug!("Excluding: {}", path.display());
                    continue;
                }
                files.push(path);
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        self.exclude_patterns.iter().any(|pattern| {
            if glob::Pattern::new(pattern).is_ok_and(|p| p.matches(&path_str)) {
                return true;
            }
            // "**/Pods/**" also excludes by substring
            let fragment = pattern.replace("**", "");
            !fragment.is_empty() && fragment != "/" && path_str.contains(&fragment)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correction::apply_corrections;
    use crate::description::RuleDescription;
    use crate::rule::CorrectableRule;
    use crate::syntax::SyntaxKind;
    use crate::types::{Location, Severity};
    use regex::Regex;

    static TRAILING: RuleDescription =
        RuleDescription::new("trailing_space", "Trailing Space", "Lines should not end in spaces");

    #[derive(Default)]
    struct TrailingSpaceRule;

    fn pattern() -> Regex {
        Regex::new(r"(\S)[ ]+\n").expect("valid regex")
    }

    impl Rule for TrailingSpaceRule {
        fn description(&self) -> &'static RuleDescription {
            &TRAILING
        }

        fn validate(&self, file: &SourceFile) -> Vec<Violation> {
            file.match_pattern(&pattern())
                .into_iter()
                .filter(|m| !m.starts_with(SyntaxKind::Comment))
                .map(|m| Violation::new(&TRAILING, Location::new(file, m.range.start + 1)))
                .collect()
        }

        fn as_correctable(&self) -> Option<&dyn CorrectableRule> {
            Some(self)
        }
    }

    impl CorrectableRule for TrailingSpaceRule {
        fn correct(&self, file: &mut SourceFile) -> Result<Vec<Correction>, CorrectionError> {
            apply_corrections(file, &TRAILING, &pattern(), "$1\n", |m| {
                !m.starts_with(SyntaxKind::Comment)
            })
            .map(|result| result.corrections)
        }
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("Sources/App")).expect("mkdir");
        std::fs::create_dir_all(dir.path().join("Pods/Lib")).expect("mkdir");
        std::fs::write(dir.path().join("Sources/App/b.swift"), "let b = 2  \n").expect("write");
        std::fs::write(dir.path().join("Sources/App/a.swift"), "let a = 1 \nlet c = 3  \n")
            .expect("write");
        std::fs::write(dir.path().join("Sources/App/notes.txt"), "text  \n").expect("write");
        std::fs::write(dir.path().join("Pods/Lib/pod.swift"), "let p = 0  \n").expect("write");
        dir
    }

    fn linter(root: &Path, config: Config) -> Linter {
        Linter::builder()
            .root(root)
            .config(config)
            .rule(TrailingSpaceRule)
            .build()
            .expect("Failed to build linter")
    }

    #[test]
    fn test_builder() {
        let linter = Linter::builder()
            .root(".")
            .exclude("**/.build/**")
            .build()
            .expect("Failed to build linter");

        assert!(linter.root().is_absolute());
        assert!(linter.rules().is_empty());
    }

    #[test]
    fn test_exclude_patterns() {
        let linter = Linter::builder()
            .root(".")
            .exclude("**/Carthage/**")
            .build()
            .expect("Failed to build linter");

        assert!(linter.should_exclude(Path::new("/app/Carthage/Checkouts/x.swift")));
        assert!(linter.should_exclude(Path::new("/app/Pods/Lib/x.swift")));
        assert!(!linter.should_exclude(Path::new("/app/Sources/x.swift")));
    }

    #[test]
    fn lint_discovers_sorts_and_excludes() {
        let dir = project();
        let result = linter(dir.path(), Config::default()).lint().expect("lint");

        assert_eq!(result.files_checked, 2);
        let found: Vec<(String, usize)> = result
            .violations
            .iter()
            .map(|v| {
                let name = v.location.file.as_ref().and_then(|p| p.file_name());
                (
                    name.map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
                    v.location.line,
                )
            })
            .collect();
        assert_eq!(
            found,
            vec![
                ("a.swift".to_string(), 1),
                ("a.swift".to_string(), 2),
                ("b.swift".to_string(), 1),
            ]
        );
    }

    #[test]
    fn severity_override_applies() {
        let dir = project();
        let config = Config::parse("[severity]\ntrailing_space = \"error\"\n").expect("config");
        let result = linter(dir.path(), config).lint().expect("lint");

        assert!(result.has_errors());
        assert!(result.violations.iter().all(|v| v.severity == Severity::Error));
    }

    #[test]
    fn correct_rewrites_files_on_disk() {
        let dir = project();
        let linter = linter(dir.path(), Config::default());

        let report = linter.correct().expect("correct");

        assert_eq!(report.files_checked, 2);
        assert_eq!(report.files_corrected, 2);
        assert_eq!(report.corrections.len(), 3);
        assert!(report.is_persisted());
        let a = std::fs::read_to_string(dir.path().join("Sources/App/a.swift")).expect("read");
        assert_eq!(a, "let a = 1\nlet c = 3\n");
        assert!(linter.lint().expect("lint").violations.is_empty());
    }

    #[test]
    fn single_file_root() {
        let dir = project();
        let path = dir.path().join("Sources/App/b.swift");
        let result = linter(&path, Config::default()).lint().expect("lint");
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn correct_file_in_memory() {
        let linter = linter(Path::new("."), Config::default());
        let mut file = SourceFile::from_contents("// note  \nlet x = 1   \n");

        let corrections = linter.correct_file(&mut file).expect("in-memory");

        assert_eq!(corrections.len(), 1);
        assert_eq!(file.contents(), "// note  \nlet x = 1\n");
    }
}
