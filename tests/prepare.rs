//! End-to-end preparation runs through the library API.

mod common;

use common::{Project, TEMPLATE_SUFFIXES, audio_component, listing, string};
use kodegen_plugin_prepare::bundler::{
    BuildContext, ConfigError, Error, ManifestError, ManifestFormat, PrepareReport, Preparer,
    ResourceIssue, ResourceKind, SettingsBuilder,
};
use kodegen_plugin_prepare::metadata::load_config_model;
use plist::Value;
use std::fs;

fn context(project: &Project) -> BuildContext {
    BuildContext {
        project_dir: project.root(),
        deployment_target: Some("10.13".into()),
        target_build_dir: Some(project.build_dir()),
        resources_folder: Some(common::RESOURCES_FOLDER.into()),
        home_dir: Some(project.home_dir()),
        ..Default::default()
    }
}

async fn builder(project: &Project, context: BuildContext) -> SettingsBuilder {
    SettingsBuilder::new()
        .config_model(load_config_model(&project.config_path()).await.unwrap())
        .context(context)
}

async fn prepare(project: &Project, context: BuildContext) -> PrepareReport {
    let settings = builder(project, context).await.build().unwrap();
    Preparer::new(settings).prepare().await
}

#[tokio::test]
async fn every_format_gets_its_identifier() {
    let project = Project::new();

    let report = prepare(&project, context(&project)).await;

    assert!(report.is_success());
    let expected = [
        ("-VST3-Info.plist", "com.acme.ACME.vst3.Foo"),
        ("-VST2-Info.plist", "com.acme.ACME.vst.Foo"),
        ("-AU-Info.plist", "com.acme.ACME.audiounit.Foo"),
        ("-macOS-AUv3-Info.plist", "com.acme.ACME.app.Foo.AUv3"),
        ("-AAX-Info.plist", "com.acme.ACME.aax.Foo"),
        ("-macOS-Info.plist", "com.acme.ACME.app.Foo"),
    ];
    for (suffix, identifier) in expected {
        let dict = project.manifest(suffix);
        assert_eq!(string(&dict, "CFBundleIdentifier"), Some(identifier), "{suffix}");
        // template keys the rules do not cover survive
        assert_eq!(string(&dict, "CFBundleDevelopmentRegion"), Some("English"));
    }

    let au = project.manifest("-AU-Info.plist");
    assert_eq!(string(audio_component(&au), "type"), Some("aufx"));
    assert_eq!(string(&au, "AudioUnit Version"), Some("0x00010203"));

    let auv3 = project.manifest("-macOS-AUv3-Info.plist");
    assert_eq!(string(&auv3, "LSMinimumSystemVersion"), Some("10.12.0"));
    let extension = auv3.get("NSExtension").and_then(Value::as_dictionary).unwrap();
    assert_eq!(
        string(extension, "NSExtensionPrincipalClass"),
        Some("IPlugAUViewController_vFoo")
    );
}

#[tokio::test]
async fn second_run_is_byte_identical() {
    let project = Project::new();

    prepare(&project, context(&project)).await;
    let first = project.manifest_bytes();
    prepare(&project, context(&project)).await;
    let second = project.manifest_bytes();

    assert_eq!(first, second);
    for bytes in &first {
        assert_eq!(bytes.last(), Some(&b'\n'));
    }
}

#[tokio::test]
async fn midi_effect_is_a_music_effect() {
    let project = Project::new();
    project.set_config("PLUG_DOES_MIDI_IN", "1");

    prepare(&project, context(&project)).await;

    let au = project.manifest("-AU-Info.plist");
    assert_eq!(string(audio_component(&au), "type"), Some("aumf"));
}

#[tokio::test]
async fn missing_images_are_skipped() {
    let project = Project::new();
    project.write("Foo/resources/fonts/Roboto-Regular.ttf", "ttf");

    let report = prepare(&project, context(&project)).await;

    assert_eq!(report.exit_code(), 0);
    assert!(report.resource(ResourceKind::Images).unwrap().is_missing());
    assert_eq!(listing(&project.staged()), ["Roboto-Regular.ttf"]);
}

#[tokio::test]
async fn missing_web_bundle_still_writes_every_manifest() {
    let project = Project::new();

    let report = prepare(&project, context(&project)).await;

    assert!(report.resource(ResourceKind::Web).unwrap().is_missing());
    assert_eq!(report.written_manifests().count(), 6);
    assert_eq!(report.exit_code(), 0);

    let strict = BuildContext {
        require_web_assets: true,
        ..context(&project)
    };
    let report = prepare(&project, strict).await;

    assert_eq!(report.written_manifests().count(), 6);
    assert_eq!(report.exit_code(), 1);
}

#[tokio::test]
async fn web_bundle_is_mirrored_into_project_and_bundle() {
    let project = Project::new();
    let dist = project.base().join("ui/dist");
    project.write("ui/dist/index.html", "<html/>");
    project.write("ui/dist/assets/app.js", "ui()");
    project.write("build/Foo.vst3/Contents/Resources/web/stale.js", "old");

    let context = BuildContext {
        web_override: Some(dist),
        ..context(&project)
    };
    let report = prepare(&project, context).await;

    assert!(report.is_success());
    for web in [project.resources().join("web"), project.staged().join("web")] {
        assert_eq!(listing(&web), ["assets", "index.html"]);
        assert_eq!(
            fs::read_to_string(web.join("assets/app.js")).unwrap(),
            "ui()"
        );
    }
}

#[tokio::test]
async fn in_project_web_bundle_is_used_when_override_is_missing() {
    let project = Project::new();
    project.write("Foo/resources/web/index.html", "<html/>");

    let context = BuildContext {
        web_override: Some(project.base().join("ui/dist")),
        web_fallbacks: vec![project.base().join("ui/build")],
        ..context(&project)
    };
    let report = prepare(&project, context).await;

    let web = report.resource(ResourceKind::Web).unwrap();
    assert_eq!(web.source.as_deref(), Some(project.resources().join("web").as_path()));
    assert_eq!(listing(&project.resources().join("web")), ["index.html"]);
    assert_eq!(listing(&project.staged().join("web")), ["index.html"]);
}

#[tokio::test]
async fn missing_template_only_fails_its_format() {
    let project = Project::new();
    fs::remove_file(project.template("-AAX-Info.plist")).unwrap();

    let report = prepare(&project, context(&project)).await;

    assert_eq!(report.written_manifests().count(), 5);
    let failed: Vec<_> = report.failed_manifests().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, ManifestFormat::Aax);
    assert!(matches!(failed[0].1, ManifestError::TemplateMissing { .. }));
    assert_eq!(report.exit_code(), 1);
}

#[tokio::test]
async fn unknown_plugin_kind_fails_before_any_output() {
    let project = Project::new();
    project.set_config("PLUG_TYPE", "7");

    let err = builder(&project, context(&project))
        .await
        .build()
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::UnknownPluginKind { .. })
    ));
    assert!(!project.build_dir().exists());
    for suffix in TEMPLATE_SUFFIXES {
        assert_eq!(
            fs::read(project.template(suffix)).unwrap(),
            Project::untouched_template()
        );
    }
}

#[tokio::test]
async fn shared_resources_are_staged_under_home() {
    let project = Project::new();
    project.set_config("PLUG_SHARED_RESOURCES", "1");
    project.write("Foo/resources/img/knob.png", "png");

    let report = prepare(&project, context(&project)).await;

    assert!(report.is_success());
    let shared = project.home_dir().join("Music/Foo/Resources");
    assert_eq!(listing(&shared), ["knob.png"]);
    assert!(!project.staged().exists());
}

#[tokio::test]
async fn format_selection_leaves_other_templates_alone() {
    let project = Project::new();

    let settings = builder(&project, context(&project))
        .await
        .formats(vec![ManifestFormat::Vst3])
        .build()
        .unwrap();
    let report = Preparer::new(settings).prepare().await;

    assert_eq!(report.manifests.len(), 1);
    assert_eq!(
        report.written_manifests().collect::<Vec<_>>(),
        [&project.template("-VST3-Info.plist")]
    );
    assert_eq!(
        string(&project.manifest("-VST3-Info.plist"), "CFBundleName"),
        Some("Foo")
    );
    assert_eq!(
        fs::read(project.template("-AAX-Info.plist")).unwrap(),
        Project::untouched_template()
    );
}

#[tokio::test]
async fn override_inside_project_web_dir_is_not_destroyed() {
    let project = Project::new();
    let dist = project.resources().join("web/dist");
    project.write("Foo/resources/web/dist/index.html", "<html/>");

    let context = BuildContext {
        web_override: Some(dist.clone()),
        ..context(&project)
    };
    let report = prepare(&project, context).await;

    assert_eq!(listing(&dist), ["index.html"]);
    assert_eq!(listing(&project.staged().join("web")), ["index.html"]);
    let web = report.resource(ResourceKind::Web).unwrap();
    assert!(matches!(
        web.issues.as_slice(),
        [ResourceIssue::OverlapsSource { .. }]
    ));
    assert_eq!(report.written_manifests().count(), 6);
}
