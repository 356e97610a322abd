//! Deterministic synthetic claim populations for demos and tests.
//!
//! Three strata: normal background claims, mildly suspicious claims,
//! and organized rings whose members share a provider, lawyer, IP and
//! address inside a tight date window. Same seed, same population.

use crate::claim::ClaimRecord;
use crate::rng::DetRng;
use chrono::{Duration, NaiveDate};

const RING_SIZE: usize = 6;

const FIRST_NAMES: &[&str] = &[
    "James", "Maria", "Robert", "Linda", "Michael", "Elena", "David", "Susan", "Carlos", "Amy",
    "Kevin", "Dana", "Brian", "Rosa", "Thomas", "Grace", "Victor", "Nina", "Paul", "Irene",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Garcia", "Johnson", "Chen", "Williams", "Patel", "Brown", "Nguyen", "Davis",
    "Martinez", "Wilson", "Kim", "Moore", "Lopez", "Taylor", "Singh", "Anderson", "Rivera",
    "Thomas", "Walker",
];

const CLINICS: &[&str] = &[
    "WellCare Clinic", "Lakeside Physical Therapy", "Summit Ortho Group", "Harbor Medical",
    "Cedar Spine Center", "Northside Rehab",
];

const LAW_FIRMS: &[&str] = &[
    "Smith & Associates", "Davis Law", "Hartley Legal Group", "Monroe Injury Law",
    "Beacon Counsel",
];

const SHOPS: &[&str] = &["Premium Auto", "AutoFix", "SpeedyRepair", "Main St Body Works"];

const CITIES: &[&str] = &["Springfield", "Fairview", "Riverside", "Hill Valley"];
const STATES: &[&str] = &["CA", "NY", "TX", "FL", "IL"];

/// Shape of a generated population.
#[derive(Debug, Clone, Copy)]
pub struct PopulationSpec {
    pub normal: usize,
    pub suspicious: usize,
    pub rings: usize,
}

impl Default for PopulationSpec {
    fn default() -> Self {
        Self {
            normal: 120,
            suspicious: 60,
            rings: 3,
        }
    }
}

/// Generate a claim population. Ring claims come last, so their ids are
/// easy to spot in demo output.
pub fn generate_population(seed: u64, spec: PopulationSpec) -> Vec<ClaimRecord> {
    let mut rng = DetRng::new(seed, 0);
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid base date");
    let mut claims = Vec::with_capacity(spec.normal + spec.suspicious + spec.rings * RING_SIZE);
    let mut serial = 0u64;

    for _ in 0..spec.normal {
        claims.push(random_claim(&mut rng, base, &mut serial, false));
    }
    for _ in 0..spec.suspicious {
        claims.push(random_claim(&mut rng, base, &mut serial, true));
    }
    for ring in 0..spec.rings {
        claims.extend(ring_claims(&mut rng, base, &mut serial, ring));
    }
    claims
}

fn next_id(serial: &mut u64) -> String {
    *serial += 1;
    format!("CLM-{serial:06}")
}

fn random_claim(
    rng: &mut DetRng,
    base: NaiveDate,
    serial: &mut u64,
    suspicious: bool,
) -> ClaimRecord {
    let mut claim = ClaimRecord::new(next_id(serial));
    let accident = base + Duration::days(rng.next_u64_below(700) as i64);
    claim.accident_date = Some(accident);
    claim.submission_date = Some(accident + Duration::days(rng.next_u64_below(21) as i64));

    claim.claimant_name = Some(format!(
        "{} {}",
        rng.pick(FIRST_NAMES),
        rng.pick(LAST_NAMES)
    ));
    claim.city = Some(rng.pick(CITIES).to_string());
    claim.state = Some(rng.pick(STATES).to_string());
    claim.provider_name = Some(rng.pick(CLINICS).to_string());
    claim.repair_shop = Some(rng.pick(SHOPS).to_string());
    claim.ip_address = Some(format!(
        "10.0.{}.{}",
        rng.next_u64_below(20),
        1 + rng.next_u64_below(200)
    ));
    claim.device_id = Some(format!("DEV-{}", 1000 + rng.next_u64_below(9000)));
    claim.email = Some(format!("user{}@example.com", 1000 + rng.next_u64_below(9000)));
    claim.phone_number = Some(format!(
        "+1-555-{}-{:04}",
        100 + rng.next_u64_below(900),
        rng.next_u64_below(10000)
    ));
    claim.vehicle_vin = Some(format!("VIN{:08}", rng.next_u64_below(100_000_000)));

    if rng.chance(0.6) {
        claim.lawyer_name = Some(rng.pick(LAW_FIRMS).to_string());
    }
    if suspicious {
        claim.text_fraud_score = (6 + rng.next_u64_below(9)) as u8;
        if rng.chance(0.4) {
            claim.missing_docs = vec!["police_report".to_string()];
        }
    } else {
        claim.text_fraud_score = rng.next_u64_below(5) as u8;
        if rng.chance(0.1) {
            claim.missing_docs = vec!["repair_estimate".to_string()];
        }
    }
    claim
}

/// Six claims sharing provider, lawyer, IP and address, filed within a
/// few days of each other in the same state.
fn ring_claims(
    rng: &mut DetRng,
    base: NaiveDate,
    serial: &mut u64,
    ring: usize,
) -> Vec<ClaimRecord> {
    let provider = format!("Ring Clinic {ring}");
    let lawyer = format!("Ring Law Group {ring}");
    let ip = format!("192.168.{ring}.100");
    let address = format!("{} Elm St", 100 + ring);
    let state = STATES[ring % STATES.len()].to_string();
    let ring_start = base + Duration::days((ring as i64) * 45 + rng.next_u64_below(300) as i64);

    (0..RING_SIZE)
        .map(|member| {
            let mut claim = random_claim(rng, base, serial, true);
            // Ring members carry their own claimant and contact
            // identities; the entities they share are exactly the
            // provider, lawyer, IP and address above.
            let n = *serial as usize;
            claim.claimant_name = Some(format!(
                "{} {}",
                FIRST_NAMES[n % FIRST_NAMES.len()],
                LAST_NAMES[(n / FIRST_NAMES.len()) % LAST_NAMES.len()]
            ));
            claim.repair_shop = None;
            claim.device_id = Some(format!("DEV-{}", 10_000 + n));
            claim.email = Some(format!("claimant{n}@example.com"));
            claim.phone_number = Some(format!("+1-555-019-{n:04}"));
            claim.provider_name = Some(provider.clone());
            claim.lawyer_name = Some(lawyer.clone());
            claim.ip_address = Some(ip.clone());
            claim.address = Some(address.clone());
            claim.state = Some(state.clone());
            let filed = ring_start + Duration::days((member % 3) as i64);
            claim.accident_date = Some(filed - Duration::days(2));
            claim.submission_date = Some(filed);
            claim
        })
        .collect()
}
