//! Dataset loading through the service container.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use id3tree::application::ApplicationError;
use id3tree::config::Settings;
use id3tree::infrastructure::di::ServiceContainer;

const WEATHER_SEMICOLON: &str = "\
Outlook;Wind;Play
Sunny;Weak;No
Overcast;Weak;Yes
Rain;Strong;No
Rain;Weak;Yes
";

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn given_semicolon_delimiter_in_settings_when_loading_then_parses_columns() {
    // Arrange
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "weather.csv", WEATHER_SEMICOLON);
    let settings = Settings {
        delimiter: ';',
        ..Settings::default()
    };
    let container = ServiceContainer::new(settings);

    // Act
    let dataset = container
        .classifier
        .load_dataset(&tmp.path().join("weather.csv"), None)
        .unwrap();

    // Assert
    assert_eq!(dataset.columns, vec!["Outlook", "Wind", "Play"]);
    assert_eq!(dataset.target, "Play");
    assert_eq!(dataset.len(), 4);
}

#[test]
fn given_relative_name_and_data_dir_when_resolving_then_joins_data_dir() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "weather-id3-test.csv", WEATHER_SEMICOLON);
    let settings = Settings {
        delimiter: ';',
        data_dir: Some(tmp.path().to_path_buf()),
        ..Settings::default()
    };
    let container = ServiceContainer::new(settings);

    let path = container.resolve_dataset(Path::new("weather-id3-test.csv"));
    assert_eq!(path, tmp.path().join("weather-id3-test.csv"));

    let model = container
        .classifier
        .train(&container.classifier.load_dataset(&path, Some("Play")).unwrap(), None)
        .unwrap();
    assert_eq!(model.tree.feature(), Some("Outlook"));
}

#[test]
fn given_missing_file_when_loading_then_dataset_not_found() {
    let tmp = TempDir::new().unwrap();
    let container = ServiceContainer::new(Settings::default());

    let err = container
        .classifier
        .load_dataset(&tmp.path().join("nope.csv"), None)
        .unwrap_err();

    assert!(matches!(err, ApplicationError::DatasetNotFound(_)));
}

#[test]
fn given_ragged_record_when_loading_then_reports_line() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "ragged.csv", "A,B,Label\nx,y,1\nx,1\n");
    let container = ServiceContainer::new(Settings::default());

    let err = container
        .classifier
        .load_dataset(&tmp.path().join("ragged.csv"), None)
        .unwrap_err();

    match err {
        ApplicationError::Dataset { message } => {
            assert!(message.contains("line 3"), "{}", message);
            assert!(message.contains("expected 3 fields, found 2"), "{}", message);
        }
        other => panic!("expected dataset error, got {:?}", other),
    }
}

#[test]
fn given_unknown_target_when_loading_then_dataset_error() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "weather.csv", "Outlook,Play\nSunny,No\n");
    let container = ServiceContainer::new(Settings::default());

    let err = container
        .classifier
        .load_dataset(&tmp.path().join("weather.csv"), Some("Label"))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Dataset { .. }));
}
