use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Travel style tags a user can list in their preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Adventure,
    Relaxation,
    Cultural,
    Nightlife,
    Nature,
    Food,
    Photography,
    Backpacking,
    Luxury,
}

impl TravelStyle {
    pub const ALL: [TravelStyle; 9] = [
        TravelStyle::Adventure,
        TravelStyle::Relaxation,
        TravelStyle::Cultural,
        TravelStyle::Nightlife,
        TravelStyle::Nature,
        TravelStyle::Food,
        TravelStyle::Photography,
        TravelStyle::Backpacking,
        TravelStyle::Luxury,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelStyle::Adventure => "adventure",
            TravelStyle::Relaxation => "relaxation",
            TravelStyle::Cultural => "cultural",
            TravelStyle::Nightlife => "nightlife",
            TravelStyle::Nature => "nature",
            TravelStyle::Food => "food",
            TravelStyle::Photography => "photography",
            TravelStyle::Backpacking => "backpacking",
            TravelStyle::Luxury => "luxury",
        }
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TravelStyle::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == wanted)
            .ok_or_else(|| format!("unknown travel style: {}", s))
    }
}

/// Preferred group size for a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupSize {
    Solo,
    SmallGroup,
    LargeGroup,
    #[default]
    Any,
}

impl GroupSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupSize::Solo => "solo",
            GroupSize::SmallGroup => "small-group",
            GroupSize::LargeGroup => "large-group",
            GroupSize::Any => "any",
        }
    }
}

impl FromStr for GroupSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solo" => Ok(GroupSize::Solo),
            "small-group" => Ok(GroupSize::SmallGroup),
            "large-group" => Ok(GroupSize::LargeGroup),
            "any" => Ok(GroupSize::Any),
            other => Err(format!("unknown group size: {}", other)),
        }
    }
}

/// Inclusive budget range in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: i64,
    pub max: i64,
}

impl BudgetRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Width of the shared part of two ranges. Zero or negative when they
    /// only touch or do not meet at all.
    #[inline]
    pub fn overlap(&self, other: &BudgetRange) -> i64 {
        self.max
            .min(other.max)
            .saturating_sub(self.min.max(other.min))
    }

    /// Closed interval intersection: touching ranges intersect.
    #[inline]
    pub fn intersects(&self, other: &BudgetRange) -> bool {
        self.min <= other.max && self.max >= other.min
    }
}

impl Default for BudgetRange {
    fn default() -> Self {
        Self { min: 1000, max: 50000 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPreferences {
    #[serde(rename = "budgetRange", default)]
    pub budget_range: BudgetRange,
    #[serde(rename = "travelStyle", default)]
    pub travel_style: Vec<TravelStyle>,
    #[serde(rename = "accommodationType", default)]
    pub accommodation_type: Vec<String>,
    #[serde(rename = "groupSize", default)]
    pub group_size: GroupSize,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Default for TravelPreferences {
    fn default() -> Self {
        Self {
            budget_range: BudgetRange::default(),
            travel_style: Vec::new(),
            accommodation_type: Vec::new(),
            group_size: GroupSize::Any,
            languages: default_languages(),
            interests: Vec::new(),
        }
    }
}

fn default_languages() -> Vec<String> {
    vec!["english".to_string()]
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(rename = "tripsCompleted", default)]
    pub trips_completed: u32,
    #[serde(rename = "companionsFound", default)]
    pub companions_found: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(rename = "reviewCount", default)]
    pub review_count: u32,
}

/// Public user profile as used for companion matching and the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(rename = "profilePicture", default)]
    pub profile_picture: String,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(rename = "travelPreferences", default)]
    pub travel_preferences: TravelPreferences,
    #[serde(default)]
    pub stats: UserStats,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Rating clamped into the 0-5 scale; NaN counts as unrated
    pub fn clamped_rating(&self) -> f64 {
        let rating = self.stats.rating;
        if rating.is_nan() {
            0.0
        } else {
            rating.clamp(0.0, 5.0)
        }
    }

    pub fn has_style(&self, style: &str) -> bool {
        self.travel_preferences
            .travel_style
            .iter()
            .any(|s| s.as_str() == style)
    }

    pub fn city(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.city.as_deref())
    }

    pub fn country(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.country.as_deref())
    }
}

fn default_true() -> bool { true }

/// Companion search parameters after boundary parsing
#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    pub requester_id: Option<String>,
    /// Active budget window. Open bounds are already widened.
    pub budget: Option<BudgetRange>,
    /// Lowercased style tag; unknown tags never match
    pub travel_style: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for MatchQuery {
    fn default() -> Self {
        Self {
            requester_id: None,
            budget: None,
            travel_style: None,
            destination: None,
            start_date: None,
            end_date: None,
            page: 1,
            page_size: 20,
        }
    }
}

/// A candidate profile with its compatibility score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u8,
}

/// Weights of the compatibility sub-scores, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompatibilityWeights {
    pub budget: f64,
    pub travel_style: f64,
    pub rating: f64,
    pub experience: f64,
}

impl Default for CompatibilityWeights {
    fn default() -> Self {
        Self {
            budget: 30.0,
            travel_style: 40.0,
            rating: 20.0,
            experience: 10.0,
        }
    }
}

/// User directory search parameters
#[derive(Debug, Clone, PartialEq)]
pub struct UserSearch {
    pub city: Option<String>,
    pub country: Option<String>,
    pub travel_style: Option<String>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub page: usize,
    pub limit: usize,
}

impl UserSearch {
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.limit
    }
}

/// Member of a trip room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "profilePicture", default)]
    pub profile_picture: String,
    #[serde(rename = "joinedAt")]
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripCreator {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "profilePicture", default)]
    pub profile_picture: String,
}

/// Group travel plan users can join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRoom {
    pub id: String,
    pub title: String,
    pub destination: String,
    pub description: String,
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
    pub budget: BudgetRange,
    #[serde(rename = "maxParticipants")]
    pub max_participants: u32,
    #[serde(rename = "currentParticipants")]
    pub current_participants: u32,
    pub creator: TripCreator,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "travelStyle", default)]
    pub travel_style: Vec<TravelStyle>,
    #[serde(rename = "accommodationType", default)]
    pub accommodation_type: Option<String>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Trip room listing parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TripSearch {
    pub destination: Option<String>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub travel_style: Option<String>,
    pub page: usize,
    pub limit: usize,
}

impl TripSearch {
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.limit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    System,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Image => "image",
            MessageType::System => "system",
        }
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(MessageType::Text),
            "image" => Ok(MessageType::Image),
            "system" => Ok(MessageType::System),
            other => Err(format!("unknown message type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSender {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "profilePicture", default)]
    pub profile_picture: String,
}

/// Chat message posted in a trip room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "tripRoomId")]
    pub trip_room_id: String,
    pub sender: MessageSender,
    pub message: String,
    #[serde(rename = "messageType", default)]
    pub message_type: MessageType,
    #[serde(rename = "isRead", default)]
    pub is_read: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
