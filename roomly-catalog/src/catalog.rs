use roomly_core::{Hotel, HotelCategory};

/// The hotel catalog: reference data loaded once at startup. Read paths
/// borrow into the owned list; nothing mutates it after construction.
pub struct HotelCatalog {
    hotels: Vec<Hotel>,
}

impl HotelCatalog {
    pub fn new(hotels: Vec<Hotel>) -> Self {
        Self { hotels }
    }

    /// Catalog preloaded with the demo inventory.
    pub fn with_seed_data() -> Self {
        Self::new(seed_hotels())
    }

    pub fn all(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn get(&self, id: &str) -> Option<&Hotel> {
        self.hotels.iter().find(|h| h.id == id)
    }

    /// Case-insensitive substring search on location. `None` returns the
    /// whole catalog.
    pub fn search(&self, location: Option<&str>) -> Vec<&Hotel> {
        match location {
            None => self.hotels.iter().collect(),
            Some(loc) => {
                let needle = loc.to_lowercase();
                self.hotels
                    .iter()
                    .filter(|h| h.location.to_lowercase().contains(&needle))
                    .collect()
            }
        }
    }

    /// Up to three hotels in the same category, excluding the hotel itself.
    pub fn similar(&self, hotel_id: &str, category: HotelCategory) -> Vec<&Hotel> {
        self.hotels
            .iter()
            .filter(|h| h.id != hotel_id && h.category == category)
            .take(3)
            .collect()
    }

    /// Hotels by rating, best first, optionally narrowed to a region.
    /// Callers decide how many of the head entries to show.
    pub fn popular(&self, region: Option<&str>) -> Vec<&Hotel> {
        let mut hotels = self.search(region);
        hotels.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        hotels
    }
}

fn amenities<const N: usize>(names: [&str; N]) -> Vec<String> {
    names.map(String::from).to_vec()
}

/// Demo inventory, fixed at startup.
pub fn seed_hotels() -> Vec<Hotel> {
    vec![
        Hotel {
            id: "hotel-1".to_string(),
            name: "Seaside Paradise Resort".to_string(),
            location: "Miami Beach, FL".to_string(),
            description: "Luxurious beachfront resort with stunning ocean views and world-class amenities.".to_string(),
            rating: 4.8,
            base_price_per_night: 299.99,
            amenities: amenities(["Pool", "Beach Access", "Spa", "Restaurant", "WiFi", "Gym"]),
            image_url: "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?w=800".to_string(),
            available_rooms: 15,
            category: HotelCategory::Luxury,
        },
        Hotel {
            id: "hotel-2".to_string(),
            name: "Mountain View Lodge".to_string(),
            location: "Aspen, CO".to_string(),
            description: "Cozy mountain retreat perfect for ski enthusiasts and nature lovers.".to_string(),
            rating: 4.6,
            base_price_per_night: 189.99,
            amenities: amenities(["Ski Access", "Fireplace", "Restaurant", "WiFi", "Hot Tub"]),
            image_url: "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=800".to_string(),
            available_rooms: 8,
            category: HotelCategory::Premium,
        },
        Hotel {
            id: "hotel-3".to_string(),
            name: "Downtown Business Hotel".to_string(),
            location: "New York, NY".to_string(),
            description: "Modern hotel in the heart of Manhattan, perfect for business travelers.".to_string(),
            rating: 4.4,
            base_price_per_night: 249.99,
            amenities: amenities(["Business Center", "WiFi", "Gym", "Restaurant", "Room Service"]),
            image_url: "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb?w=800".to_string(),
            available_rooms: 22,
            category: HotelCategory::Standard,
        },
        Hotel {
            id: "hotel-4".to_string(),
            name: "Budget Inn Express".to_string(),
            location: "Orlando, FL".to_string(),
            description: "Affordable and comfortable accommodation near major attractions.".to_string(),
            rating: 4.0,
            base_price_per_night: 79.99,
            amenities: amenities(["WiFi", "Parking", "Breakfast"]),
            image_url: "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?w=800".to_string(),
            available_rooms: 30,
            category: HotelCategory::Economy,
        },
        Hotel {
            id: "hotel-5".to_string(),
            name: "Historic City Center Inn".to_string(),
            location: "Boston, MA".to_string(),
            description: "Charming historic hotel with modern comforts in the heart of Boston.".to_string(),
            rating: 4.5,
            base_price_per_night: 169.99,
            amenities: amenities(["WiFi", "Restaurant", "Bar", "Concierge"]),
            image_url: "https://images.unsplash.com/photo-1564501049412-61c2a3083791?w=800".to_string(),
            available_rooms: 12,
            category: HotelCategory::Standard,
        },
        Hotel {
            id: "hotel-6".to_string(),
            name: "Desert Oasis Spa Resort".to_string(),
            location: "Scottsdale, AZ".to_string(),
            description: "Luxury desert resort with championship golf and world-renowned spa.".to_string(),
            rating: 4.9,
            base_price_per_night: 349.99,
            amenities: amenities(["Golf Course", "Spa", "Pool", "Restaurant", "WiFi", "Gym", "Tennis"]),
            image_url: "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=800".to_string(),
            available_rooms: 18,
            category: HotelCategory::Luxury,
        },
        Hotel {
            id: "hotel-7".to_string(),
            name: "Coastal Breeze Hotel".to_string(),
            location: "San Diego, CA".to_string(),
            description: "Relaxing beachside hotel with easy access to local attractions.".to_string(),
            rating: 4.3,
            base_price_per_night: 159.99,
            amenities: amenities(["Beach Access", "Pool", "WiFi", "Parking"]),
            image_url: "https://images.unsplash.com/photo-1571003123894-1f0594d2b5d9?w=800".to_string(),
            available_rooms: 25,
            category: HotelCategory::Standard,
        },
        Hotel {
            id: "hotel-8".to_string(),
            name: "Urban Boutique Suites".to_string(),
            location: "Seattle, WA".to_string(),
            description: "Trendy boutique hotel in Seattle's vibrant downtown area.".to_string(),
            rating: 4.7,
            base_price_per_night: 219.99,
            amenities: amenities(["WiFi", "Restaurant", "Bar", "Gym", "Rooftop Terrace"]),
            image_url: "https://images.unsplash.com/photo-1596436889106-be35e843f974?w=800".to_string(),
            available_rooms: 10,
            category: HotelCategory::Premium,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        let catalog = HotelCatalog::with_seed_data();
        let hotel = catalog.get("hotel-1").unwrap();
        assert_eq!(hotel.name, "Seaside Paradise Resort");
        assert!(catalog.get("hotel-999").is_none());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let catalog = HotelCatalog::with_seed_data();

        let all = catalog.search(None);
        assert_eq!(all.len(), 8);

        let fl = catalog.search(Some("fl"));
        let ids: Vec<&str> = fl.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["hotel-1", "hotel-4"]);

        assert!(catalog.search(Some("antarctica")).is_empty());
    }

    #[test]
    fn similar_matches_category_and_excludes_self() {
        let catalog = HotelCatalog::with_seed_data();
        let similar = catalog.similar("hotel-1", HotelCategory::Luxury);
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].id, "hotel-6");

        let similar = catalog.similar("hotel-3", HotelCategory::Standard);
        let ids: Vec<&str> = similar.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["hotel-5", "hotel-7"]);
    }

    #[test]
    fn popular_sorts_by_rating_descending() {
        let catalog = HotelCatalog::with_seed_data();
        let popular = catalog.popular(None);
        assert_eq!(popular.len(), 8);
        assert_eq!(popular[0].id, "hotel-6");
        assert_eq!(popular[1].id, "hotel-1");
        for pair in popular.windows(2) {
            assert!(pair[0].rating >= pair[1].rating);
        }

        let fl = catalog.popular(Some("fl"));
        assert_eq!(fl.len(), 2);
        assert_eq!(fl[0].id, "hotel-1");
    }
}
