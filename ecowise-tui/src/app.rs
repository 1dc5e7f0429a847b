use std::sync::Arc;

use ecowise_core::{
    centers::filter_centers,
    model::{
        CenterKind, DirectionsInfo, HistoryEntry, LeaderboardEntry, RecyclingCenter, UserProfile,
    },
    service::{Analysis, EcoWiseService},
};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Screen {
    Analyze,
    Results,
    Centers,
    Directions,
    Profile,
    Leaderboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KindFilter {
    All,
    Recycling,
    Donation,
    Special,
}

impl KindFilter {
    pub(crate) fn next(self) -> Self {
        match self {
            KindFilter::All => KindFilter::Recycling,
            KindFilter::Recycling => KindFilter::Donation,
            KindFilter::Donation => KindFilter::Special,
            KindFilter::Special => KindFilter::All,
        }
    }

    pub(crate) fn as_kind(self) -> Option<CenterKind> {
        match self {
            KindFilter::All => None,
            KindFilter::Recycling => Some(CenterKind::Recycling),
            KindFilter::Donation => Some(CenterKind::Donation),
            KindFilter::Special => Some(CenterKind::Special),
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            KindFilter::All => "all",
            KindFilter::Recycling => "recycling",
            KindFilter::Donation => "donation",
            KindFilter::Special => "special",
        }
    }
}

pub(crate) struct App {
    pub service: Arc<EcoWiseService>,
    pub username: String,
    pub user_location: Option<(f64, f64)>,

    pub screen: Screen,

    pub path_input: String,
    pub analysis: Option<Analysis>,

    pub centers: Vec<RecyclingCenter>,
    pub kind_filter: KindFilter,
    pub search_input: String,
    pub center_index: usize,

    pub directions: Option<DirectionsInfo>,

    pub profile: Option<UserProfile>,
    pub history: Vec<HistoryEntry>,
    pub leaderboard: Vec<LeaderboardEntry>,

    pub is_loading: bool,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
}

impl App {
    pub(crate) fn new(
        service: Arc<EcoWiseService>,
        username: String,
        user_location: Option<(f64, f64)>,
    ) -> Self {
        Self {
            service,
            username,
            user_location,
            screen: Screen::Analyze,
            path_input: String::new(),
            analysis: None,
            centers: Vec::new(),
            kind_filter: KindFilter::All,
            search_input: String::new(),
            center_index: 0,
            directions: None,
            profile: None,
            history: Vec::new(),
            leaderboard: Vec::new(),
            is_loading: false,
            error_message: None,
            status_message: None,
        }
    }

    /// Center list after the active kind filter and search query.
    pub(crate) fn visible_centers(&self) -> Vec<&RecyclingCenter> {
        let kind = self.kind_filter.as_kind();
        filter_centers(&self.centers, kind.as_ref(), &self.search_input)
    }

    pub(crate) fn selected_center(&self) -> Option<&RecyclingCenter> {
        self.visible_centers().get(self.center_index).copied()
    }

    /// Where "back" lands from the Centers and Profile screens.
    pub(crate) fn results_or_analyze(&self) -> Screen {
        if self.analysis.is_some() {
            Screen::Results
        } else {
            Screen::Analyze
        }
    }

    pub(crate) fn reset_analysis(&mut self) {
        self.analysis = None;
        self.path_input.clear();
        self.status_message = None;
        self.screen = Screen::Analyze;
    }
}
