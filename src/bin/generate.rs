use std::env;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;

use rand::Rng;
use rand_distr::{Distribution, Normal};

// Fallback station list when no CSV is given: name and yearly mean.
const DEFAULT_STATIONS: &[(&str, f64)] = &[
    ("Abha", 18.0),
    ("Accra", 26.4),
    ("Adelaide", 17.3),
    ("Amsterdam", 10.2),
    ("Athens", 19.2),
    ("Baghdad", 22.8),
    ("Bangkok", 28.6),
    ("Berlin", 10.3),
    ("Bogotá", 14.0),
    ("Brisbane", 21.4),
    ("Cairo", 21.4),
    ("Cape Town", 16.2),
    ("Copenhagen", 9.1),
    ("Dakar", 24.0),
    ("Denver", 10.4),
    ("Dhaka", 25.9),
    ("Dublin", 9.8),
    ("Hanoi", 23.6),
    ("Harare", 18.4),
    ("Havana", 25.2),
    ("Helsinki", 5.9),
    ("Houston", 20.8),
    ("Istanbul", 13.9),
    ("Jakarta", 26.7),
    ("Kingston", 27.4),
    ("Kyiv", 8.4),
    ("La Paz", 8.5),
    ("Lagos", 26.8),
    ("Lisbon", 17.5),
    ("London", 11.3),
    ("Madrid", 15.0),
    ("Melbourne", 15.1),
    ("Mexico City", 17.5),
    ("Nairobi", 17.8),
    ("Oslo", 5.7),
    ("Ottawa", 6.6),
    ("Paris", 12.3),
    ("Prague", 8.4),
    ("Reykjavík", 4.3),
    ("Riyadh", 26.0),
    ("Rome", 15.2),
    ("San Francisco", 14.6),
    ("Seoul", 12.5),
    ("Singapore", 27.0),
    ("Stockholm", 6.6),
    ("Tokyo", 15.4),
    ("Toronto", 9.4),
    ("Vienna", 10.4),
    ("Warsaw", 8.5),
    ("Wellington", 12.9),
];

#[derive(Debug)]
struct Station {
    name: String,
    distribution: Normal<f64>,
}

impl Station {
    fn new(name: &str, mean: f64) -> Self {
        Self {
            name: name.to_string(),
            distribution: Normal::new(mean, 10.0)
                .unwrap_or_else(|_| panic!("could not create distribution for: {name}")),
        }
    }

    fn sample(&self, rng: &mut impl Rng) -> f64 {
        self.distribution.sample(rng).clamp(-99.9, 99.9)
    }
}

#[derive(Debug)]
struct ParseStationError;

impl FromStr for Station {
    type Err = ParseStationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, mean_str) = s.split_once(';').ok_or(ParseStationError)?;
        let mean: f64 = mean_str.parse().map_err(|_| ParseStationError)?;
        Ok(Station::new(name, mean))
    }
}

fn main() -> io::Result<()> {
    let count: u64 = env::args()
        .nth(1)
        .expect("usage: generate <count> [stations.csv]")
        .replace('_', "")
        .parse()
        .expect("expected int argument");

    let stations: Vec<Station> = match env::args().nth(2) {
        Some(path) => fs::read_to_string(&path)?
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(|line| {
                line.parse()
                    .unwrap_or_else(|_| panic!("failed to parse: {line}"))
            })
            .collect(),
        None => DEFAULT_STATIONS
            .iter()
            .map(|&(name, mean)| Station::new(name, mean))
            .collect(),
    };

    let mut rng = rand::rng();
    let mut out = BufWriter::new(io::stdout().lock());

    for _ in 0..count {
        let station = &stations[rng.random_range(0..stations.len())];
        writeln!(out, "{};{:.1}", station.name, station.sample(&mut rng))?;
    }

    out.flush()
}
