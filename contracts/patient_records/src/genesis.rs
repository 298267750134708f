//! Demo patients written by `init_ledger`.

use soroban_sdk::{Env, Map, String, Vec};

use crate::record::{MedicalRecord, PatientRecord};

struct DemoPatient {
    id: &'static str,
    name: &'static str,
    age: u32,
    gender: &'static str,
    blood_type: &'static str,
    allergies: &'static str,
    diagnosis: &'static str,
    medications: &'static str,
    doctor: &'static str,
}

const DEMO_PATIENTS: [DemoPatient; 6] = [
    DemoPatient {
        id: "Patient1",
        name: "test1",
        age: 5,
        gender: "male",
        blood_type: "B+",
        allergies: "xx",
        diagnosis: "Diagnose1",
        medications: "Medications1",
        doctor: "Doctor1",
    },
    DemoPatient {
        id: "Patient2",
        name: "test2",
        age: 5,
        gender: "male",
        blood_type: "A+",
        allergies: "yy",
        diagnosis: "Diagnose2",
        medications: "Medications2",
        doctor: "Doctor2",
    },
    DemoPatient {
        id: "Patient3",
        name: "test3",
        age: 10,
        gender: "female",
        blood_type: "AB",
        allergies: "cc",
        diagnosis: "Diagnose3",
        medications: "Medications3",
        doctor: "Doctor1",
    },
    DemoPatient {
        id: "Patient4",
        name: "test4",
        age: 10,
        gender: "female",
        blood_type: "O+",
        allergies: "nn",
        diagnosis: "Diagnose4",
        medications: "Medications4",
        doctor: "Doctor2",
    },
    DemoPatient {
        id: "Patient5",
        name: "test5",
        age: 15,
        gender: "female",
        blood_type: "O-",
        allergies: "mm",
        diagnosis: "Diagnose5",
        medications: "Medications5",
        doctor: "Doctor1",
    },
    DemoPatient {
        id: "Patient6",
        name: "test6",
        age: 15,
        gender: "female",
        blood_type: "B-",
        allergies: "jj",
        diagnosis: "Diagnose6",
        medications: "Medications6",
        doctor: "Doctor2",
    },
];

const SEED_DIAGNOSES: [&str; 2] = ["diagnose11", "diagnose12"];
const SEED_MEDICATIONS: [&str; 2] = ["medication11", "medication12"];

fn strings(env: &Env, values: &[&str]) -> Vec<String> {
    let mut out = Vec::new(env);
    for value in values {
        out.push_back(String::from_str(env, value));
    }
    out
}

impl DemoPatient {
    fn to_record(&self, env: &Env) -> PatientRecord {
        let mut access_list = Map::new(env);
        access_list.set(String::from_str(env, self.doctor), true);

        PatientRecord {
            id: String::from_str(env, self.id),
            name: String::from_str(env, self.name),
            age: self.age,
            gender: String::from_str(env, self.gender),
            bloodType: String::from_str(env, self.blood_type),
            allergies: String::from_str(env, self.allergies),
            accessList: access_list,
            record: MedicalRecord {
                diagnosis: String::from_str(env, self.diagnosis),
                medications: String::from_str(env, self.medications),
                diagnosesHistory: strings(env, &SEED_DIAGNOSES),
                medicationsHistory: strings(env, &SEED_MEDICATIONS),
            },
        }
    }
}

/// The six genesis patients. Odd-numbered patients grant `Doctor1`,
/// even-numbered ones `Doctor2`.
pub fn demo_patients(env: &Env) -> Vec<PatientRecord> {
    let mut patients = Vec::new(env);
    for demo in DEMO_PATIENTS.iter() {
        patients.push_back(demo.to_record(env));
    }
    patients
}
