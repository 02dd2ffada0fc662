#![cfg(unix)]

use pretty_assertions::assert_eq;
use project_tooling::{
    docs::{ApiSection, DocConfig, DocumentationBuilder},
    error::Error,
    formatter::{black::BlackFormatter, clang::ClangFormatter, cmake::CmakeFormatter, FormatRunner},
    locator::ExecutableLocator,
    resources::Resources,
    style::load_style_config,
};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch area holding fake tools, a call log and the projects under test.
struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("bin")).expect("Failed to create bin directory");
        Self { temp_dir }
    }

    fn root(&self) -> PathBuf {
        self.temp_dir.path().canonicalize().unwrap()
    }

    fn bin_dir(&self) -> PathBuf {
        self.root().join("bin")
    }

    fn log_path(&self) -> PathBuf {
        self.root().join("calls.log")
    }

    fn locator(&self) -> ExecutableLocator {
        ExecutableLocator::with_search_path([self.bin_dir()])
    }

    /// Installs a tool that appends its name and arguments to the call log.
    fn install_tool(&self, name: &str, exit_code: i32) {
        self.install_script(name, &format!("exit {}", exit_code));
    }

    /// Installs a tool that logs its call, then runs `body`.
    fn install_script(&self, name: &str, body: &str) {
        let path = self.bin_dir().join(name);
        let script = format!(
            "#!/bin/sh\necho \"{} $*\" >> \"{}\"\n{}\n",
            name,
            self.log_path().display(),
            body
        );
        fs::write(&path, script).expect("Failed to write fake tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake tool executable");
    }

    fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Creates a project folder named `name` with the given files.
    fn create_project(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let project = self.root().join(name);
        fs::create_dir_all(&project).expect("Failed to create project directory");
        for (path, content) in files {
            let file_path = project.join(path);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent directories");
            }
            fs::write(&file_path, content).expect("Failed to write project file");
        }
        project
    }

    fn doc_config(&self, project: &Path) -> DocConfig {
        DocConfig {
            build_dir: self.root().join("build"),
            project_dir: project.to_path_buf(),
            python_package: None,
            project_version: "1.2.3".to_string(),
        }
    }

    fn doc_builder(&self, config: DocConfig) -> DocumentationBuilder {
        DocumentationBuilder::new(config, Resources::bundled(), self.locator())
    }
}

#[test]
fn test_yaml_fixture_to_one_line() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/two_line_style.yaml");
    let line = load_style_config(&path).expect("Failed to load style");

    assert_eq!(line, "{bar: 42, foo: 13}");
}

#[test]
fn test_clang_format_end_to_end() {
    let ws = Workspace::new();
    ws.install_tool("clang-format", 0);
    let project = ws.create_project(
        "robot",
        &[
            ("include/robot/arm.hpp", ""),
            ("src/arm.cpp", ""),
            ("src/notes.txt", ""),
            ("setup.py", ""),
        ],
    );

    let runner = FormatRunner::new(ws.locator(), Resources::bundled());
    let report = runner
        .run(&ClangFormatter, &[project.join("include"), project.join("src")])
        .expect("Formatting should succeed");

    assert_eq!(
        report.files,
        vec![project.join("include/robot/arm.hpp"), project.join("src/arm.cpp")]
    );
    assert!(report.failures.is_empty());

    let calls = ws.calls();
    assert_eq!(calls.len(), 1, "clang-format should run once: {:?}", calls);
    assert!(calls[0].starts_with("clang-format -style={"));
    assert!(calls[0].contains("BasedOnStyle: Google"));
    assert!(calls[0].contains(" -i "));
    assert!(calls[0].ends_with("src/arm.cpp"));
}

#[test]
fn test_clang_format_versioned_executable() {
    let ws = Workspace::new();
    ws.install_tool("clang-format-8", 0);
    let project = ws.create_project("robot", &[("a.cc", "")]);

    let runner = FormatRunner::new(ws.locator(), Resources::bundled());
    runner.run(&ClangFormatter, &[&project]).expect("Formatting should succeed");

    assert!(ws.calls()[0].starts_with("clang-format-8 "));
}

#[test]
fn test_cmake_format_runs_once_per_file() {
    let ws = Workspace::new();
    ws.install_tool("cmake-format", 0);
    let project = ws.create_project(
        "robot",
        &[
            ("CMakeLists.txt", ""),
            ("cmake/a.cmake", ""),
            ("cmake/b.cmake", ""),
            ("src/main.cpp", ""),
        ],
    );

    let runner = FormatRunner::new(ws.locator(), Resources::bundled());
    let report = runner.run(&CmakeFormatter, &[&project]).expect("Formatting should succeed");

    assert_eq!(report.files.len(), 3);
    let calls = ws.calls();
    assert_eq!(calls.len(), 3);
    for call in &calls {
        assert!(call.starts_with("cmake-format -c "));
        assert!(call.contains("_cmake-format.yaml"));
        assert!(call.contains("--outfile-path"));
    }
}

#[test]
fn test_black_failure_is_not_fatal() {
    let ws = Workspace::new();
    ws.install_tool("black", 123);
    let project = ws.create_project("robot", &[("robot/__init__.py", ""), ("robot/stubs.pyi", "")]);

    let runner = FormatRunner::new(ws.locator(), Resources::bundled());
    let report = runner.run(&BlackFormatter, &[&project]).expect("Tool failure must not be fatal");

    assert_eq!(report.files.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].contains("exit code 123"));
}

#[test]
fn test_missing_formatter_spawns_nothing() {
    let ws = Workspace::new();
    let project = ws.create_project("robot", &[("a.cpp", "")]);

    let runner = FormatRunner::new(ws.locator(), Resources::bundled());
    let err = runner.run(&ClangFormatter, &[&project]).unwrap_err();

    match err {
        Error::ToolNotFound { tool, hint } => {
            assert_eq!(tool, "clang-format");
            assert!(hint.contains("apt-get install clang-format"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(ws.calls().is_empty());
}

#[test]
fn test_nothing_to_format() {
    let ws = Workspace::new();
    ws.install_tool("clang-format", 0);
    let project = ws.create_project("robot", &[("README.md", "")]);

    let runner = FormatRunner::new(ws.locator(), Resources::bundled());
    let report = runner.run(&ClangFormatter, &[&project]).expect("Empty input is not an error");

    assert!(report.is_noop());
    assert!(ws.calls().is_empty());
}

#[test]
fn test_missing_input_path() {
    let ws = Workspace::new();
    ws.install_tool("clang-format", 0);
    let missing = ws.root().join("nope");

    let runner = FormatRunner::new(ws.locator(), Resources::bundled());
    let err = runner.run(&ClangFormatter, &[&missing]).unwrap_err();

    assert!(matches!(err, Error::PathNotFound(path) if path == missing));
    assert!(ws.calls().is_empty());
}

#[test]
fn test_python_only_project_has_only_python_section() {
    let ws = Workspace::new();
    ws.install_tool("sphinx-apidoc", 0);
    let project = ws.create_project(
        "robot",
        &[("python/robot/__init__.py", ""), ("python/robot/arm.py", "")],
    );

    let report = ws
        .doc_builder(ws.doc_config(&project))
        .compose()
        .expect("Compose should succeed");

    assert_eq!(report.sections, vec![ApiSection::Python]);
    assert_eq!(report.output_dir, ws.root().join("build/share/robot/docs/sphinx"));

    let index = fs::read_to_string(report.output_dir.join("index.rst")).unwrap();
    assert!(index.starts_with("Welcome to robot's documentation!\n================================="));
    assert!(index.contains("Python API\n----------"));
    assert!(index.contains("   modules\n"));
    assert!(!index.contains("C++ API"));
    assert!(!index.contains("CMake API"));
    assert!(!index.contains("General Documentation"));
    assert!(!index.contains('@'));

    let conf = fs::read_to_string(report.output_dir.join("conf.py")).unwrap();
    assert!(conf.contains("project = \"robot\""));
    assert!(conf.contains("version = \"1.2.3\""));
    assert!(conf.contains(&format!("python_path = \"{}\"", project.join("python").display())));

    let calls = ws.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        format!(
            "sphinx-apidoc -f -o {} {}",
            report.output_dir.display(),
            project.join("python/robot").display()
        )
    );
}

#[test]
fn test_full_project_build() {
    let ws = Workspace::new();
    for tool in ["doxygen", "breathe-apidoc", "sphinx-apidoc", "sphinx-build"] {
        ws.install_tool(tool, 0);
    }
    let project = ws.create_project(
        "robot",
        &[
            ("include/robot/arm.hpp", "class Arm {};"),
            ("src/robot/__init__.py", ""),
            ("cmake/robot_helpers.cmake", "# helpers"),
            ("doc/intro.md", "# Intro"),
            ("Readme.md", "# robot"),
            ("LICENSE", "BSD-3-Clause"),
        ],
    );

    let report = ws
        .doc_builder(ws.doc_config(&project))
        .build()
        .expect("Build should succeed");
    let out = &report.output_dir;

    assert_eq!(
        report.sections,
        vec![
            ApiSection::Cpp,
            ApiSection::Python,
            ApiSection::Cmake,
            ApiSection::GeneralDocumentation
        ]
    );
    assert!(report.tool_failures.is_empty());

    let calls: Vec<String> = ws
        .calls()
        .iter()
        .map(|c| c.split(' ').next().unwrap().to_string())
        .collect();
    assert_eq!(
        calls,
        vec!["doxygen", "breathe-apidoc", "sphinx-apidoc", "sphinx-build"]
    );

    let doxyfile = fs::read_to_string(out.join("doxygen/Doxyfile")).unwrap();
    assert!(doxyfile.contains("PROJECT_NAME           = \"robot\""));
    assert!(doxyfile.contains(&format!("INPUT                  = {}", project.display())));
    assert!(doxyfile.contains("*.h *.hpp *.hh *.cpp *.c *.cc *.hxx *.cxx"));
    assert!(doxyfile.contains(&format!("OUTPUT_DIRECTORY       = {}", out.join("doxygen").display())));

    assert!(out.join("doxygen_index.rst").is_file());
    assert!(out.join("doxygen_index_one_page.rst").is_file());

    let cmake_doc = fs::read_to_string(out.join("cmake_doc.rst")).unwrap();
    assert!(cmake_doc.contains(
        "robot_helpers\n-------------\n\n.. cmake-module:: cmake/robot_helpers.cmake\n"
    ));
    assert_eq!(
        fs::read_to_string(out.join("cmake/robot_helpers.cmake")).unwrap(),
        "# helpers"
    );

    assert_eq!(fs::read_to_string(out.join("doc/intro.md")).unwrap(), "# Intro");
    let general = fs::read_to_string(out.join("general_documentation.rst")).unwrap();
    assert!(general.contains("   doc/*"));

    assert_eq!(fs::read_to_string(out.join("readme.md")).unwrap(), "# robot");
    assert_eq!(fs::read_to_string(out.join("license.txt")).unwrap(), "BSD-3-Clause");

    let index = fs::read_to_string(out.join("index.rst")).unwrap();
    assert!(index.contains(".. toctree::\n   :maxdepth: 2\n\n   readme\n"));
    assert!(index.contains("License\n-------\n\n.. literalinclude:: license.txt\n"));
    let general_at = index.find("General Documentation").unwrap();
    let cpp_at = index.find("C++ API").unwrap();
    let python_at = index.find("Python API").unwrap();
    let cmake_at = index.find("CMake API").unwrap();
    assert!(general_at < cpp_at && cpp_at < python_at && python_at < cmake_at);

    let conf = fs::read_to_string(out.join("conf.py")).unwrap();
    assert!(conf.contains(&out.join("doxygen/xml").display().to_string()));
}

#[test]
fn test_compose_is_idempotent() {
    let ws = Workspace::new();
    ws.install_tool("sphinx-apidoc", 0);
    let project = ws.create_project(
        "robot",
        &[
            ("robot/__init__.py", ""),
            ("cmake/b.cmake", ""),
            ("cmake/a.cmake", ""),
            ("docs/guide.rst", "Guide"),
        ],
    );
    let builder = ws.doc_builder(ws.doc_config(&project));

    let first = builder.compose().expect("First compose should succeed");
    let index_first = fs::read(first.output_dir.join("index.rst")).unwrap();
    let conf_first = fs::read(first.output_dir.join("conf.py")).unwrap();
    let cmake_first = fs::read(first.output_dir.join("cmake_doc.rst")).unwrap();
    fs::write(first.output_dir.join("stale.rst"), "left over").unwrap();

    let second = builder.compose().expect("Second compose should succeed");

    assert_eq!(fs::read(second.output_dir.join("index.rst")).unwrap(), index_first);
    assert_eq!(fs::read(second.output_dir.join("conf.py")).unwrap(), conf_first);
    assert_eq!(fs::read(second.output_dir.join("cmake_doc.rst")).unwrap(), cmake_first);
    assert!(!second.output_dir.join("stale.rst").exists());
}

#[test]
fn test_cpp_sources_without_doxygen_fail_fast() {
    let ws = Workspace::new();
    ws.install_tool("breathe-apidoc", 0);
    let project = ws.create_project("robot", &[("src/a.cpp", "")]);

    let err = ws.doc_builder(ws.doc_config(&project)).compose().unwrap_err();

    assert!(matches!(err, Error::ToolNotFound { ref tool, .. } if tool == "doxygen"));
    assert!(ws.calls().is_empty());
}

#[test]
fn test_failing_doc_tool_does_not_stop_the_build() {
    let ws = Workspace::new();
    ws.install_tool("sphinx-apidoc", 2);
    let project = ws.create_project("robot", &[("python/robot/__init__.py", "")]);

    let report = ws
        .doc_builder(ws.doc_config(&project))
        .compose()
        .expect("Tool failure must not be fatal");

    assert_eq!(report.tool_failures.len(), 1);
    assert!(report.tool_failures[0].starts_with("sphinx-apidoc"));
    assert!(report.output_dir.join("index.rst").is_file());
    assert!(report.output_dir.join("conf.py").is_file());
}

#[test]
fn test_missing_readme_and_license_are_tolerated() {
    let ws = Workspace::new();
    let project = ws.create_project("robot", &[]);

    let report = ws
        .doc_builder(ws.doc_config(&project))
        .compose()
        .expect("Compose should succeed without readme or license");

    assert!(report.sections.is_empty());
    assert!(!report.output_dir.join("readme.md").exists());
    assert!(!report.output_dir.join("license.txt").exists());

    let index = fs::read_to_string(report.output_dir.join("index.rst")).unwrap();
    assert!(!index.contains("readme"));
    assert!(!index.contains("license.txt"));
    assert!(!index.contains('@'));
}

#[test]
fn test_readme_is_copied_under_its_lower_case_name() {
    let ws = Workspace::new();
    let project = ws.create_project(
        "robot",
        &[("README.rst", "robot\n====="), ("License.md", "MIT")],
    );

    let report = ws
        .doc_builder(ws.doc_config(&project))
        .compose()
        .expect("Compose should succeed");
    let out = &report.output_dir;

    assert_eq!(fs::read_to_string(out.join("readme.rst")).unwrap(), "robot\n=====");
    assert!(!out.join("README.rst").exists());
    assert_eq!(fs::read_to_string(out.join("license.txt")).unwrap(), "MIT");

    let index = fs::read_to_string(out.join("index.rst")).unwrap();
    assert!(index.contains("   readme\n"));
}

#[test]
fn test_plain_text_readme_is_included_literally() {
    let ws = Workspace::new();
    let project = ws.create_project("robot", &[("README.txt", "robot")]);

    let report = ws
        .doc_builder(ws.doc_config(&project))
        .compose()
        .expect("Compose should succeed");

    assert!(report.output_dir.join("readme.txt").is_file());
    let index = fs::read_to_string(report.output_dir.join("index.rst")).unwrap();
    assert!(index.contains(".. literalinclude:: readme.txt\n"));
    assert!(!index.contains("toctree::\n   :maxdepth: 2\n\n   readme\n"));
}

#[test]
fn test_relative_paths_are_resolved_before_tools_run() {
    let ws = Workspace::new();
    // Fails unless the package path still names a folder from the output folder.
    ws.install_script("sphinx-apidoc", "[ -d \"$4\" ] || exit 1");

    // Paths below are relative to the working directory.
    let scratch = tempfile::Builder::new()
        .prefix("doc-relative-")
        .tempdir_in(".")
        .expect("Failed to create scratch directory");
    let relative_root = scratch.path();
    assert!(relative_root.is_relative());
    let project = relative_root.join("robot");
    fs::create_dir_all(project.join("bindings/pyrobot")).unwrap();
    fs::write(project.join("bindings/pyrobot/core.py"), "").unwrap();

    let config = DocConfig {
        build_dir: relative_root.join("build"),
        project_dir: project.clone(),
        python_package: Some(project.join("bindings/pyrobot")),
        project_version: "0.1.0".to_string(),
    };
    let report = ws.doc_builder(config).compose().expect("Compose should succeed");

    assert!(report.output_dir.is_absolute());
    assert_eq!(
        report.output_dir,
        relative_root.join("build/share/robot/docs/sphinx").canonicalize().unwrap()
    );
    assert!(report.tool_failures.is_empty(), "{:?}", report.tool_failures);

    let package = report.layout.python_package.clone().unwrap();
    assert!(package.is_absolute());
    assert_eq!(
        package.canonicalize().unwrap(),
        project.join("bindings/pyrobot").canonicalize().unwrap()
    );

    let conf = fs::read_to_string(report.output_dir.join("conf.py")).unwrap();
    let python_path = conf
        .lines()
        .find_map(|line| line.strip_prefix("python_path = "))
        .map(|value| value.trim_matches('"').to_string())
        .unwrap();
    assert!(Path::new(&python_path).is_absolute());
    assert!(Path::new(&python_path).join("pyrobot").is_dir());
}

#[test]
fn test_missing_sphinx_build_fails_after_compose() {
    let ws = Workspace::new();
    let project = ws.create_project("robot", &[]);

    let err = ws.doc_builder(ws.doc_config(&project)).build().unwrap_err();

    assert!(matches!(err, Error::ToolNotFound { ref tool, .. } if tool == "sphinx-build"));
}

#[test]
fn test_python_override_and_build_dir_inside_project() {
    let ws = Workspace::new();
    ws.install_tool("sphinx-apidoc", 0);
    let project = ws.create_project(
        "robot",
        &[("bindings/pyrobot/core.py", ""), ("build/generated/config.h", "")],
    );

    let config = DocConfig {
        build_dir: project.join("build"),
        project_dir: project.clone(),
        python_package: Some(project.join("bindings/pyrobot")),
        project_version: "0.1.0".to_string(),
    };
    let report = ws.doc_builder(config).compose().expect("Compose should succeed");

    // Headers generated in the build folder are not part of the project API.
    assert_eq!(report.sections, vec![ApiSection::Python]);
    assert_eq!(
        report.layout.python_package,
        Some(project.join("bindings/pyrobot"))
    );
}
