//! Sequential configuration collector
//!
//! The collector walks a fixed sequence of steps: the four axis questions,
//! the "use defaults" shortcut, then the package questions one at a time.
//! Axis steps already resolved by flags or detection are skipped. A
//! package answer that fails validation repeats the same step.

use super::generator::PackageMetadata;
use super::key::{ConfigurationKey, Database, Framework, Language, PackageManager, PartialKey};
use super::questions::Field;
use anyhow::Result;

/// Source of answers for the collector
///
/// The interactive implementation lives in the `tui` module; tests drive
/// the collector with scripted answers.
pub trait Prompter {
    /// Pick one of `options`, each paired with its label
    fn select<T: Copy + Eq>(&mut self, prompt: &str, options: &[(T, &'static str)]) -> Result<T>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Free text; `default` is shown as a hint and may be returned as is
    fn input(&mut self, prompt: &str, default: &str) -> Result<String>;

    /// Report a rejected answer before the question is asked again
    fn reject(&mut self, message: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AskLanguage,
    AskDatabase,
    AskFramework,
    AskPackageManager,
    AskUseDefaults,
    Ask(Field),
    Done,
}

/// Everything gathered so far
#[derive(Debug, Clone)]
pub struct CollectorState {
    pub step: Step,
    pub key: PartialKey,
    pub metadata: Option<PackageMetadata>,
    dir_name: String,
    assume_defaults: bool,
    key_only: bool,
}

/// Final result of a collection run
#[derive(Debug, Clone)]
pub struct Collected {
    pub key: ConfigurationKey,
    pub metadata: Option<PackageMetadata>,
}

impl CollectorState {
    /// State for a new project in a directory called `dir_name`
    pub fn for_project(preset: PartialKey, dir_name: &str, assume_defaults: bool) -> Self {
        let mut state = Self {
            step: Step::AskLanguage,
            key: preset,
            metadata: None,
            dir_name: dir_name.to_string(),
            assume_defaults,
            key_only: false,
        };
        state.step = state.next_from(Step::AskLanguage);
        state
    }

    /// State that only resolves the configuration key
    pub fn for_key(preset: PartialKey) -> Self {
        let mut state = Self {
            step: Step::AskLanguage,
            key: preset,
            metadata: None,
            dir_name: String::new(),
            assume_defaults: true,
            key_only: true,
        };
        state.step = state.next_from(Step::AskLanguage);
        state
    }

    pub fn is_done(&self) -> bool {
        self.step == Step::Done
    }

    /// First step at or after `step` that still needs an answer
    fn next_from(&mut self, step: Step) -> Step {
        let mut step = step;
        loop {
            step = match step {
                Step::AskLanguage if self.key.language.is_some() => Step::AskDatabase,
                Step::AskDatabase if self.key.database.is_some() => Step::AskFramework,
                Step::AskFramework if self.key.framework.is_some() => Step::AskPackageManager,
                Step::AskPackageManager if self.key.package_manager.is_some() => {
                    Step::AskUseDefaults
                }
                Step::AskUseDefaults if self.key_only => Step::Done,
                Step::AskUseDefaults if self.assume_defaults => {
                    self.seed_metadata();
                    Step::Done
                }
                other => return other,
            };
        }
    }

    fn seed_metadata(&mut self) {
        if self.metadata.is_none() {
            if let Ok(key) = self.key.complete() {
                self.metadata = Some(PackageMetadata::defaults(&key, &self.dir_name));
            }
        }
    }

    fn after(step: Step) -> Step {
        match step {
            Step::AskLanguage => Step::AskDatabase,
            Step::AskDatabase => Step::AskFramework,
            Step::AskFramework => Step::AskPackageManager,
            Step::AskPackageManager => Step::AskUseDefaults,
            Step::AskUseDefaults => Step::Ask(Field::ALL[0]),
            Step::Ask(field) => Field::ALL
                .iter()
                .position(|f| *f == field)
                .and_then(|i| Field::ALL.get(i + 1))
                .map_or(Step::Done, |next| Step::Ask(*next)),
            Step::Done => Step::Done,
        }
    }

    /// Ask the current step's question and move on
    pub fn advance<P: Prompter>(&mut self, prompter: &mut P) -> Result<()> {
        match self.step {
            Step::AskLanguage => {
                self.key.language = Some(prompter.select("Which language?", &language_options())?);
            }
            Step::AskDatabase => {
                self.key.database = Some(prompter.select("Which database?", &database_options())?);
            }
            Step::AskFramework => {
                self.key.framework =
                    Some(prompter.select("Which framework?", &framework_options())?);
            }
            Step::AskPackageManager => {
                self.key.package_manager = Some(
                    prompter.select("Which package manager?", &package_manager_options())?,
                );
            }
            Step::AskUseDefaults => {
                self.seed_metadata();
                if prompter.confirm("Use default package.json values?", false)? {
                    self.step = Step::Done;
                    return Ok(());
                }
            }
            Step::Ask(field) => {
                let metadata = self.metadata.as_mut().ok_or_else(|| {
                    anyhow::anyhow!("package questions reached before the configuration was chosen")
                })?;
                let raw = prompter.input(&field.prompt(), &field.default_answer(metadata))?;
                match field.resolve(&raw, metadata) {
                    Ok(value) => field.store(metadata, value),
                    Err(e) => {
                        prompter.reject(&e.to_string())?;
                        return Ok(());
                    }
                }
            }
            Step::Done => return Ok(()),
        }

        let next = Self::after(self.step);
        self.step = self.next_from(next);
        Ok(())
    }

    /// Drive the collector to completion
    pub fn run<P: Prompter>(mut self, prompter: &mut P) -> Result<Collected> {
        while !self.is_done() {
            self.advance(prompter)?;
        }
        Ok(Collected {
            key: self.key.complete()?,
            metadata: self.metadata,
        })
    }
}

fn language_options() -> Vec<(Language, &'static str)> {
    Language::ALL.iter().map(|l| (*l, l.display_name())).collect()
}

fn database_options() -> Vec<(Database, &'static str)> {
    Database::ALL.iter().map(|d| (*d, d.display_name())).collect()
}

fn framework_options() -> Vec<(Framework, &'static str)> {
    Framework::ALL.iter().map(|f| (*f, f.display_name())).collect()
}

fn package_manager_options() -> Vec<(PackageManager, &'static str)> {
    PackageManager::ALL.iter().map(|p| (*p, p.binary())).collect()
}

/// Resolve a full key, prompting only for the missing axes
pub fn resolve_key<P: Prompter>(preset: PartialKey, prompter: &mut P) -> Result<ConfigurationKey> {
    Ok(CollectorState::for_key(preset).run(prompter)?.key)
}


#[cfg(test)]
mod tests {
    use super::scripted::ScriptedPrompter;
    use super::*;

    fn full_preset() -> PartialKey {
        PartialKey {
            database: Some(Database::Mongo),
            framework: Some(Framework::Express),
            language: Some(Language::JavaScript),
            package_manager: Some(PackageManager::Npm),
        }
    }

    #[test]
    fn test_flags_skip_axis_questions() {
        let state = CollectorState::for_project(full_preset(), "shop", false);
        assert_eq!(state.step, Step::AskUseDefaults);
    }

    #[test]
    fn test_yes_skips_everything() {
        let mut prompter = ScriptedPrompter::new(&[]);
        let collected = CollectorState::for_project(full_preset(), "shop", true)
            .run(&mut prompter)
            .unwrap();

        assert!(prompter.asked.is_empty());
        let metadata = collected.metadata.unwrap();
        assert_eq!(metadata.name, "shop");
        assert_eq!(metadata.main, "index.js");
    }

    #[test]
    fn test_axis_questions_in_order() {
        let preset = PartialKey {
            framework: Some(Framework::Fastify),
            ..Default::default()
        };
        let mut prompter = ScriptedPrompter::new(&["TypeScript", "SQL (sequelize)", "bun"]);
        let key = resolve_key(preset, &mut prompter).unwrap();

        assert_eq!(
            prompter.asked,
            vec!["Which language?", "Which database?", "Which package manager?"]
        );
        assert_eq!(
            key,
            ConfigurationKey {
                database: Database::Sequelize,
                framework: Framework::Fastify,
                language: Language::TypeScript,
                package_manager: PackageManager::Bun,
            }
        );
    }

    #[test]
    fn test_use_defaults_confirmation() {
        let mut prompter = ScriptedPrompter::new(&["yes"]);
        let collected = CollectorState::for_project(full_preset(), "shop", false)
            .run(&mut prompter)
            .unwrap();

        assert_eq!(prompter.asked.len(), 1);
        assert_eq!(collected.metadata.unwrap().version, "1.0.0");
    }

    #[test]
    fn test_invalid_version_is_asked_again() {
        let mut prompter = ScriptedPrompter::new(&[
            "no", // use defaults
            "",   // name
            "abc", // version, rejected
            "",   // version again
            "An API",
            "",
            "",
            "",
            "api, rest",
            "Jane",
            "mit",
        ]);
        let collected = CollectorState::for_project(full_preset(), "shop", false)
            .run(&mut prompter)
            .unwrap();

        assert_eq!(prompter.rejections.len(), 1);
        assert!(prompter.rejections[0].contains("version"));
        let versions = prompter.asked.iter().filter(|p| *p == "Version").count();
        assert_eq!(versions, 2);

        let metadata = collected.metadata.unwrap();
        assert_eq!(metadata.name, "shop");
        assert_eq!(metadata.version, "1.0.0");
        assert_eq!(metadata.description, "An API");
        assert_eq!(metadata.main, "index.js");
        assert_eq!(metadata.repository, None);
        assert_eq!(metadata.keywords, vec!["api", "rest"]);
        assert_eq!(metadata.author, "Jane");
        assert_eq!(metadata.license, "MIT");
    }

    #[test]
    fn test_package_questions_follow_fixed_order() {
        let mut answers = vec!["no"];
        answers.extend(std::iter::repeat("").take(Field::ALL.len()));
        let mut prompter = ScriptedPrompter::new(&answers);

        CollectorState::for_project(full_preset(), "shop", false)
            .run(&mut prompter)
            .unwrap();

        let expected: Vec<String> = std::iter::once("Use default package.json values?".to_string())
            .chain(Field::ALL.iter().map(|f| f.prompt()))
            .collect();
        assert_eq!(prompter.asked, expected);
    }

    #[test]
    fn test_typescript_default_entry_point() {
        let preset = PartialKey {
            language: Some(Language::TypeScript),
            ..full_preset()
        };
        let collected = CollectorState::for_project(preset, "svc", true)
            .run(&mut ScriptedPrompter::new(&[]))
            .unwrap();
        assert_eq!(collected.metadata.unwrap().main, "index.ts");
    }
}
