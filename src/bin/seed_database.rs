#!/usr/bin/env cargo
//! Petagri Database Seeder
//!
//! Terminal tool that fills a running API instance with realistic demo data:
//! farms, consultants, drivers, partner stores with catalogues, scheduled
//! visits with field reports, and one tender taken all the way from
//! assignment to an approved winner.
//!
//! Usage:
//!   `cargo run --bin seed_database -- --url http://localhost:3000 --token YOUR_JWT_TOKEN`

use chrono::{Duration as ChronoDuration, Utc};
use clap::{Arg, Command};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use reqwest::Client;
use serde_json::{Value, json};
use tokio::time::Duration;

#[derive(Debug, Clone)]
pub struct SeedingConfig {
    pub base_url: String,
    pub jwt_token: String,
    pub client: Client,
}

pub struct DatabaseSeeder {
    config: SeedingConfig,
}

const FARMS: &[(&str, &str, &str, f64)] = &[
    ("Kebun Sawit Makmur", "Kampar, Riau", "kelapa sawit", 24.5),
    ("Kebun Teh Harapan", "Sukabumi, Jawa Barat", "teh", 8.0),
    ("Kebun Jagung Subur", "Metro, Lampung", "jagung", 12.25),
    ("Kebun Kentang Dataran", "Garut, Jawa Barat", "kentang", 3.6),
    ("Kebun Kakao Lestari", "Polewali, Sulawesi Barat", "kakao", 6.4),
];

const CONSULTANTS: &[(&str, &str)] = &[
    ("Budi Santoso", "budi.santoso"),
    ("Dewi Lestari", "dewi.lestari"),
    ("Hendra Gunawan", "hendra.gunawan"),
];

const DRIVERS: &[(&str, &str, &str)] = &[
    ("Joko Susilo", "truck", "B 9531 KJA"),
    ("Rudi Hartono", "van", "D 1287 UTC"),
];

const PARTNERS: &[(&str, &str, &str, &str)] = &[
    ("Toko Tani Makmur", "Pak Dedi", "Depok", "Jawa Barat"),
    ("Toko Subur Jaya", "Bu Rina", "Jakarta Selatan", "DKI Jakarta"),
    ("Toko Sumber Rejeki", "Pak Harun", "Metro", "Lampung"),
];

const PRODUCTS: &[(&str, &str, f64)] = &[
    ("Pupuk NPK 16-16-16", "karung", 185_000.0),
    ("Pupuk Urea", "karung", 340_000.0),
    ("Fungisida Mankozeb", "kg", 92_500.0),
    ("Insektisida Emamektin", "botol", 195_000.0),
    ("Herbisida Glifosat", "botol", 125_000.0),
];

impl DatabaseSeeder {
    pub fn new(base_url: String, jwt_token: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        Self {
            config: SeedingConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                jwt_token,
                client,
            },
        }
    }

    async fn post(&self, endpoint: &str, data: &Value) -> Result<Value, String> {
        let url = format!("{}{endpoint}", self.config.base_url);
        let mut request = self
            .config
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(data);
        if !self.config.jwt_token.is_empty() {
            request = request.header(
                "authorization",
                format!("Bearer {}", self.config.jwt_token),
            );
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("Request error {endpoint}: {e}"))?;

        if response.status().is_success() {
            response
                .json::<Value>()
                .await
                .map_err(|e| format!("JSON parse error {endpoint}: {e}"))
        } else {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            Err(format!("HTTP {status} {endpoint}: {error_text}"))
        }
    }

    async fn put(&self, endpoint: &str, data: &Value) -> Result<Value, String> {
        let url = format!("{}{endpoint}", self.config.base_url);
        let mut request = self
            .config
            .client
            .put(&url)
            .header("content-type", "application/json")
            .json(data);
        if !self.config.jwt_token.is_empty() {
            request = request.header(
                "authorization",
                format!("Bearer {}", self.config.jwt_token),
            );
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("Request error {endpoint}: {e}"))?;

        if response.status().is_success() {
            response
                .json::<Value>()
                .await
                .map_err(|e| format!("JSON parse error {endpoint}: {e}"))
        } else {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            Err(format!("HTTP {status} {endpoint}: {error_text}"))
        }
    }

    fn progress_bar(len: u64, message: &'static str) -> ProgressBar {
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::with_template("{msg:30} [{bar:40.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("##-"),
        );
        pb.set_message(message);
        pb
    }

    pub async fn run(&self) -> Result<(), String> {
        println!(
            "{}",
            style("Seeding Petagri demo data").bold().underlined()
        );

        // Farms
        let pb = Self::progress_bar(FARMS.len() as u64, "Farms");
        let mut farms = Vec::new();
        for (name, location, commodity, area) in FARMS {
            let farm = self
                .post(
                    "/api/farms",
                    &json!({
                        "name": name,
                        "location": location,
                        "commodity": commodity,
                        "area_ha": area
                    }),
                )
                .await?;
            farms.push(farm);
            pb.inc(1);
        }
        pb.finish();

        // Consultants (accounts provisioned by the API)
        let pb = Self::progress_bar(CONSULTANTS.len() as u64, "Consultants");
        let mut consultants = Vec::new();
        for (full_name, handle) in CONSULTANTS {
            let consultant = self
                .post(
                    "/api/consultants",
                    &json!({
                        "full_name": full_name,
                        "email": format!("{handle}@petagri.id"),
                        "phone": format!("+628{}", rand::rng().random_range(100_000_000..999_999_999u64))
                    }),
                )
                .await?;
            consultants.push(consultant);
            pb.inc(1);
        }
        pb.finish();

        // Drivers
        let pb = Self::progress_bar(DRIVERS.len() as u64, "Drivers");
        for (name, vehicle_type, plate) in DRIVERS {
            self.post(
                "/api/drivers",
                &json!({
                    "name": name,
                    "phone": format!("+628{}", rand::rng().random_range(100_000_000..999_999_999u64)),
                    "email": format!("{}@petagri.id", name.to_lowercase().replace(' ', ".")),
                    "vehicle_type": vehicle_type,
                    "vehicle_plate_number": plate
                }),
            )
            .await?;
            pb.inc(1);
        }
        pb.finish();

        // Partner stores with a catalogue each
        let pb = Self::progress_bar(PARTNERS.len() as u64, "Partner stores");
        let mut partners = Vec::new();
        for (name, owner, city, province) in PARTNERS {
            let partner = self
                .post(
                    "/api/partners",
                    &json!({
                        "name": name,
                        "owner_name": owner,
                        "address": format!("Jl. Pasar {} No. {}", city, rand::rng().random_range(1..99)),
                        "city": city,
                        "province": province,
                        "handphone": format!("+628{}", rand::rng().random_range(100_000_000..999_999_999u64)),
                        "email": format!("{}@petagri.id", name.to_lowercase().replace(' ', "."))
                    }),
                )
                .await?;

            for (product_name, unit, price) in PRODUCTS {
                self.post(
                    "/api/products",
                    &json!({
                        "mitra_id": partner["id"],
                        "name": product_name,
                        "unit": unit,
                        "base_price": price * (1.0 + rand::rng().random_range(-5..5) as f64 / 100.0)
                    }),
                )
                .await?;
            }

            partners.push(partner);
            pb.inc(1);
        }
        pb.finish();

        // One visit per farm, round-robin over consultants; report the first two
        let pb = Self::progress_bar(FARMS.len() as u64, "Visits and reports");
        let mut reports = Vec::new();
        for (i, farm) in farms.iter().enumerate() {
            let consultant = &consultants[i % consultants.len()];
            let visit = self
                .post(
                    "/api/visits",
                    &json!({
                        "farm_id": farm["id"],
                        "consultant_id": consultant["id"],
                        "scheduled_date": (Utc::now() + ChronoDuration::days(i as i64 + 1)).to_rfc3339()
                    }),
                )
                .await?;

            if i < 2 {
                let report = self
                    .put_report(visit["id"].as_str().unwrap(), farm)
                    .await?;
                reports.push(report);
            }
            pb.inc(1);
        }
        pb.finish();

        // One tender: assignment from the first report, offerings, winner
        let pb = Self::progress_bar(3, "Tender workflow");
        let report_id = reports[0]["id"].as_str().unwrap();
        let assignment = self
            .post(
                &format!("/api/visit_reports/{report_id}/tender_assignments"),
                &json!({
                    "assigned_by": consultants[0]["id"],
                    "deadline": (Utc::now() + ChronoDuration::days(7)).to_rfc3339(),
                    "message": "Mohon penawaran harga terbaik sebelum tenggat"
                }),
            )
            .await?;
        pb.inc(1);

        let assignment_id = assignment["id"].as_str().unwrap();
        let mut offerings = Vec::new();
        for partner in &partners[..2] {
            let offering = self
                .post(
                    "/api/tender_offerings",
                    &json!({
                        "tender_assign_id": assignment_id,
                        "offered_by": partner["id"],
                        "products": [
                            {
                                "product_name": "Fungisida Mankozeb",
                                "qty": 3,
                                "price": 90_000.0 + rand::rng().random_range(0..10_000) as f64
                            },
                            {
                                "product_name": "Pupuk Urea",
                                "qty": 8,
                                "price": 330_000.0 + rand::rng().random_range(0..20_000) as f64
                            }
                        ]
                    }),
                )
                .await?;
            offerings.push(offering);
        }
        pb.inc(1);

        self.put(
            &format!("/api/tender_assignments/{assignment_id}/winner"),
            &json!({ "winning_tender_offering_id": offerings[0]["id"] }),
        )
        .await?;
        pb.inc(1);
        pb.finish();

        println!(
            "\n{} {} farms, {} consultants, {} partners, {} reports, 1 decided tender",
            style("Done:").green().bold(),
            farms.len(),
            consultants.len(),
            partners.len(),
            reports.len(),
        );

        Ok(())
    }

    async fn put_report(&self, visit_id: &str, farm: &Value) -> Result<Value, String> {
        self.post(
            &format!("/api/visits/{visit_id}/report"),
            &json!({
                "plant_type": farm["commodity"],
                "plant_age": format!("{} bulan", rand::rng().random_range(2..18)),
                "land_area": farm["area_ha"],
                "problems": "Gejala serangan hama terlihat pada beberapa blok",
                "weather_notes": "Cerah berawan",
                "recommendations": [
                    {
                        "product_name": "Fungisida Mankozeb",
                        "function": "pengendalian jamur daun",
                        "dosage": "2 g/L",
                        "estimated_qty": 3,
                        "urgency": "segera"
                    },
                    {
                        "product_name": "Pupuk Urea",
                        "estimated_qty": 8,
                        "urgency": "terjadwal"
                    }
                ]
            }),
        )
        .await
    }
}

#[tokio::main]
async fn main() {
    let matches = Command::new("seed_database")
        .about("Seed a running Petagri API instance with demo data")
        .arg(
            Arg::new("url")
                .long("url")
                .default_value("http://localhost:3000")
                .help("Base URL of the API"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .default_value("")
                .help("JWT bearer token for secured endpoints"),
        )
        .get_matches();

    let base_url = matches.get_one::<String>("url").unwrap().clone();
    let token = matches.get_one::<String>("token").unwrap().clone();

    let seeder = DatabaseSeeder::new(base_url, token);
    if let Err(err) = seeder.run().await {
        eprintln!("{} {err}", style("Seeding failed:").red().bold());
        std::process::exit(1);
    }
}
