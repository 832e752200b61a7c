//! Hardcoded dispatch data.
//!
//! The demo has no dispatch backend. Every emergency carries the same
//! location, caller and condition, and every trip is routed to the same
//! hospital.

use crate::trip::{Destination, GeoPoint};

/// Where the ambulance is parked (Bengaluru city center).
pub const AMBULANCE_POSITION: GeoPoint = GeoPoint::new(12.9716, 77.5946);

/// Location of the simulated emergency.
pub const EMERGENCY_LOCATION: GeoPoint = GeoPoint::new(12.975, 77.6);

/// Street address of the emergency.
pub const EMERGENCY_ADDRESS: &str = "Indiranagar, Bengaluru, Karnataka 560038";

/// Caller contact number.
pub const EMERGENCY_CONTACT: &str = "+91 98765 43210";

/// Reported patient condition.
pub const EMERGENCY_CONDITION: &str = "Chest pain, difficulty breathing";

/// Distance to the emergency shown on the alert.
pub const EMERGENCY_DISTANCE: &str = "2.3 km away";

/// ETA to the emergency shown on the alert.
pub const EMERGENCY_ETA: &str = "8 minutes";

/// Name of the receiving hospital.
pub const DESTINATION_NAME: &str = "Apollo Hospital";

/// Location of the receiving hospital.
pub const DESTINATION_LOCATION: GeoPoint = GeoPoint::new(12.98, 77.61);

/// Name shown in the home screen header.
pub const DRIVER_NAME: &str = "Rajesh Kumar";

/// Coverage radius drawn around the ambulance on the home map (meters).
pub const COVERAGE_RADIUS_M: f32 = 5_000.0;

/// Home stats card: trips completed today.
pub const TODAYS_TRIPS: u32 = 7;

/// Home stats card: average response time.
pub const AVG_RESPONSE_MIN: &str = "8.2";

/// The receiving hospital as a trip destination.
pub fn destination() -> Destination { Destination::new(DESTINATION_NAME, DESTINATION_LOCATION) }
