use charge::core::reading::ReadingSource;
use charge::platform::DumpFileSource;
use std::fs;
use tempfile::TempDir;

const DUMP: &str = r#"+-o AppleSmartBattery  <class AppleSmartBattery, id 0x100000252, registered, matched, active, busy 0 (0 ms), retain 7>
    {
      "AppleRawCurrentCapacity" = 2048
      "AppleRawMaxCapacity" = 4096
      "DesignCapacity" = 4790
      "IsCharging" = Yes
      "ExternalConnected" = Yes
      "InstantAmperage" = 2100
      "Voltage" = 12010
    }
"#;

#[test]
fn test_dump_file_source_reads_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ioreg.txt");
    fs::write(&path, DUMP).unwrap();

    let reading = DumpFileSource::new(&path).unwrap().read().unwrap();
    assert_eq!(reading.raw_current, Some(2048));
    assert_eq!(reading.raw_max, Some(4096));
    assert_eq!(reading.voltage, Some(12010));
    assert_eq!(reading.instant_amperage, Some(2100));
    assert!(reading.is_charging);
    assert!(reading.cell_voltages.is_empty());

    let complete = reading.complete().unwrap();
    assert_eq!(complete.design_capacity, Some(4790));
}

#[test]
fn test_dump_file_source_missing_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let source = DumpFileSource::new(temp_dir.path().join("nope.txt")).unwrap();
    assert!(source.read().is_err());
}

#[test]
fn test_dump_without_battery_is_incomplete() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ioreg.txt");
    fs::write(&path, "").unwrap();

    let reading = DumpFileSource::new(&path).unwrap().read().unwrap();
    assert!(reading.complete().unwrap_err().is_incomplete_reading());
}
