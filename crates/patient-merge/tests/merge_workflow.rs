use patient_merge::linkage::{DateColumns, LinkageError, MergeJob};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const APPOINTMENTS: &str = "Patient's first name,Patient's last name,Date of appointment,Provider\n\
JENNIFER,smith,10/19/2023 14:00 - Jennifer,Dr. Lee\n\
Robert,Jones,10-20-23,Dr. Lee\n\
Ann,Lee,,Dr. Patel\n\
Maria,Garcia,11/02/2023,Dr. Patel\n";

const NEURO_VISITS: &str = "First Name,Last Name,Last Visit in Neuro,Diagnosis,Medications\n\
Jenny-Jennifer,Smithson,10/19/2023,migraine; aura,topiramate\n\
jennifer,SMITH,10/19/23,aura;  tension,\n\
Robert,Jones,10/21/2023,tremor,propranolol\n\
ann,lee,03/03/2023,epilepsy,\"levetiracetam; lamotrigine\"\n";

fn write_inputs(dir: &TempDir, primary: &str, secondary: &str) -> MergeJob {
    let primary_path = dir.path().join("appointments.csv");
    let secondary_path = dir.path().join("neuro.csv");
    fs::write(&primary_path, primary).expect("write primary");
    fs::write(&secondary_path, secondary).expect("write secondary");
    MergeJob::new(primary_path, secondary_path, dir.path().join("merged.csv"))
}

fn read_output(path: &Path) -> String {
    fs::read_to_string(path).expect("merged output exists")
}

#[test]
fn merge_enriches_every_appointment_row() {
    let dir = TempDir::new().expect("temp dir");
    let job = write_inputs(&dir, APPOINTMENTS, NEURO_VISITS);

    let summary = job.run().expect("merge succeeds");

    assert_eq!(
        read_output(&job.output),
        "First Name,Last Name,Date,Provider,Diagnosis,Medications\n\
Jennifer,Smith,2023-10-19,Dr. Lee,aura; migraine; tension,topiramate\n\
Robert,Jones,2023-10-20,Dr. Lee,,\n\
Ann,Lee,,Dr. Patel,epilepsy,lamotrigine; levetiracetam\n\
Maria,Garcia,2023-11-02,Dr. Patel,,\n"
    );
    assert_eq!(summary.primary_rows, 4);
    assert_eq!(summary.secondary_rows, 4);
    assert_eq!(summary.matched_rows, 2);
    assert_eq!(summary.unmatched_rows, 2);
    assert_eq!(summary.name_only_rows, 1);
    assert_eq!(summary.extra_columns, vec!["Diagnosis", "Medications"]);
}

#[test]
fn rerunning_produces_identical_bytes() {
    let dir = TempDir::new().expect("temp dir");
    let job = write_inputs(&dir, APPOINTMENTS, NEURO_VISITS);

    job.run().expect("first merge");
    let first = fs::read(&job.output).expect("first output");
    job.run().expect("second merge");
    let second = fs::read(&job.output).expect("second output");

    assert_eq!(first, second);
}

#[test]
fn missing_primary_date_column_aborts_before_writing() {
    let dir = TempDir::new().expect("temp dir");
    let job = write_inputs(
        &dir,
        "First Name,Last Name,Visit Date\nAnn,Lee,01/01/2024\n",
        NEURO_VISITS,
    );

    let error = job.run().expect_err("schema rejected");

    assert!(matches!(
        error,
        LinkageError::MissingColumn { ref column, .. } if column == "Date of appointment"
    ));
    assert!(!job.output.exists());
}

#[test]
fn missing_secondary_date_column_aborts_before_writing() {
    let dir = TempDir::new().expect("temp dir");
    let job = write_inputs(
        &dir,
        APPOINTMENTS,
        "First Name,Last Name,Diagnosis\nAnn,Lee,epilepsy\n",
    );

    let error = job.run().expect_err("schema rejected");

    assert_eq!(
        error.to_string(),
        "secondary file must have a 'Last Visit in Neuro' column"
    );
    assert!(!job.output.exists());
}

#[test]
fn configured_date_columns_replace_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let job = write_inputs(
        &dir,
        "First Name,Last Name,Seen On\nMaria,Garcia,11/02/2023\n",
        "First Name,Last Name,Neuro Visit,Diagnosis\nMaria,Garcia,11-02-2023,neuropathy\n",
    )
    .with_date_columns(DateColumns {
        primary: "Seen On".to_string(),
        secondary: "Neuro Visit".to_string(),
    });

    job.run().expect("merge succeeds");

    assert_eq!(
        read_output(&job.output),
        "First Name,Last Name,Date,Diagnosis\nMaria,Garcia,2023-11-02,neuropathy\n"
    );
}

#[test]
fn empty_secondary_still_yields_one_row_per_primary_row() {
    let dir = TempDir::new().expect("temp dir");
    let job = write_inputs(
        &dir,
        APPOINTMENTS,
        "First Name,Last Name,Last Visit in Neuro,Diagnosis\n",
    );

    let summary = job.run().expect("merge succeeds");
    let output = read_output(&job.output);

    assert_eq!(output.lines().count(), 5);
    assert!(output.lines().skip(1).all(|line| line.ends_with(",")));
    assert_eq!(summary.matched_rows, 0);
}
