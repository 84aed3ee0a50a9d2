use super::*;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

impl App {
    /// Replace the list with freshly fetched doctors, keeping the filter.
    pub fn set_doctors(&mut self, mut doctors: Vec<DoctorRecord>) {
        doctors.sort_by_key(|d| d.name.to_lowercase());
        self.doctors = doctors;
        self.filter_doctors();
    }

    pub fn selected_doctor(&self) -> Option<&DoctorRecord> {
        self.filtered_doctors.get(self.selected_index)
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.filtered_doctors.len() {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn filter_doctors(&mut self) {
        if self.search_input.value.is_empty() {
            self.filtered_doctors = self.doctors.clone();
        } else {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(DoctorRecord, i64)> = self
                .doctors
                .iter()
                .filter_map(|doctor| {
                    matcher
                        .fuzzy_match(&doctor.name, &self.search_input.value)
                        .map(|score| (doctor.clone(), score))
                })
                .collect();

            scored.sort_by(|a, b| b.1.cmp(&a.1));
            self.filtered_doctors = scored.into_iter().map(|(d, _)| d).collect();
        }

        if self.selected_index >= self.filtered_doctors.len() {
            self.selected_index = self.filtered_doctors.len().saturating_sub(1);
        }
    }

    pub fn start_search(&mut self) {
        self.searching = true;
    }

    pub fn stop_search(&mut self) {
        self.searching = false;
    }

    pub fn search_input_char(&mut self, c: char) {
        self.search_input.insert(c);
        self.selected_index = 0;
        self.filter_doctors();
    }

    pub fn search_input_backspace(&mut self) {
        self.search_input.backspace();
        self.filter_doctors();
    }

    pub fn search_input_clear(&mut self) {
        self.search_input.clear();
        self.selected_index = 0;
        self.filter_doctors();
    }
}
