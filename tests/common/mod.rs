//! Shared plugin project fixture for integration tests.
#![allow(dead_code)]

use plist::{Dictionary, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// `UNLOCALIZED_RESOURCES_FOLDER_PATH` as Xcode exports it, with a leading slash.
pub const RESOURCES_FOLDER: &str = "/Foo.vst3/Contents/Resources";

/// Template suffixes for all six formats.
pub const TEMPLATE_SUFFIXES: [&str; 6] = [
    "-VST3-Info.plist",
    "-VST2-Info.plist",
    "-AU-Info.plist",
    "-macOS-AUv3-Info.plist",
    "-AAX-Info.plist",
    "-macOS-Info.plist",
];

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A plugin project named `Foo` in a temporary directory, next to a build
/// directory and a home directory.
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Project with the fixture configuration and all six templates.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let project = Self { dir };

        fs::create_dir_all(project.resources()).unwrap();
        fs::create_dir_all(project.home_dir()).unwrap();
        fs::copy(fixture("config.toml"), project.config_path()).unwrap();
        for suffix in TEMPLATE_SUFFIXES {
            fs::copy(fixture("Info.plist"), project.template(suffix)).unwrap();
        }

        project
    }

    pub fn base(&self) -> &Path {
        self.dir.path()
    }

    pub fn root(&self) -> PathBuf {
        self.base().join("Foo")
    }

    pub fn resources(&self) -> PathBuf {
        self.root().join("resources")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join("config.toml")
    }

    pub fn build_dir(&self) -> PathBuf {
        self.base().join("build")
    }

    pub fn home_dir(&self) -> PathBuf {
        self.base().join("home")
    }

    /// Where resources land when they are not shared.
    pub fn staged(&self) -> PathBuf {
        self.build_dir().join(RESOURCES_FOLDER.trim_start_matches('/'))
    }

    pub fn template(&self, suffix: &str) -> PathBuf {
        self.resources().join(format!("Foo{suffix}"))
    }

    /// Replaces one `KEY = value` line of the configuration.
    pub fn set_config(&self, key: &str, toml_value: &str) {
        let contents = fs::read_to_string(self.config_path()).unwrap();
        let prefix = format!("{key} =");
        let updated: Vec<String> = contents
            .lines()
            .map(|line| {
                if line.starts_with(&prefix) {
                    format!("{key} = {toml_value}")
                } else {
                    line.to_string()
                }
            })
            .collect();
        fs::write(self.config_path(), updated.join("\n") + "\n").unwrap();
    }

    /// Writes a file relative to the base directory, creating parents.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.base().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    /// Top-level dictionary of a generated manifest.
    pub fn manifest(&self, suffix: &str) -> Dictionary {
        Value::from_file(self.template(suffix))
            .unwrap()
            .into_dictionary()
            .unwrap()
    }

    pub fn manifest_bytes(&self) -> Vec<Vec<u8>> {
        TEMPLATE_SUFFIXES
            .iter()
            .map(|suffix| fs::read(self.template(suffix)).unwrap())
            .collect()
    }

    pub fn untouched_template() -> Vec<u8> {
        fs::read(fixture("Info.plist")).unwrap()
    }
}

pub fn string<'a>(dict: &'a Dictionary, key: &str) -> Option<&'a str> {
    dict.get(key).and_then(Value::as_string)
}

/// The first `AudioComponents` entry of an AUv2 manifest.
pub fn audio_component(dict: &Dictionary) -> &Dictionary {
    dict.get("AudioComponents")
        .and_then(Value::as_array)
        .and_then(|components| components.first())
        .and_then(Value::as_dictionary)
        .unwrap()
}

/// Sorted file names directly inside `dir`.
pub fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
