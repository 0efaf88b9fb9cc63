//! The subject catalog: a static taxonomy of course names grouped into
//! categories, plus the normalization and search rules that go with it.
//!
//! Course lists are kept deduplicated and ordered by [`compare_subjects`], the
//! same ordering used whenever subject lists are normalized for storage.

use std::{borrow::Cow, cmp::Ordering, collections::HashSet, sync::LazyLock};

use icu_collator::{Collator, CollatorOptions, Strength};
use serde::{Deserialize, Serialize};

// ─── Ordering ────────────────────────────────────────────────────────────────

/// Root-locale collator at primary strength: case and accents are ignored,
/// matching a "base" sensitivity comparison.
fn subject_collator() -> Option<Collator> {
  let mut options = CollatorOptions::new();
  options.strength = Some(Strength::Primary);
  Collator::try_new(&Default::default(), options).ok()
}

fn compare_with(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
  match collator {
    Some(c) => c.compare(a, b),
    None => a
      .chars()
      .flat_map(char::to_lowercase)
      .cmp(b.chars().flat_map(char::to_lowercase)),
  }
}

/// Locale-aware, case-insensitive ordering of subject names.
///
/// Strings differing only by case or accents compare equal, so a stable sort
/// keeps them in their original relative order.
pub fn compare_subjects(a: &str, b: &str) -> Ordering {
  compare_with(subject_collator().as_ref(), a, b)
}

/// Stable in-place sort with [`compare_subjects`].
pub fn sort_subject_list(list: &mut [String]) {
  let collator = subject_collator();
  list.sort_by(|a, b| compare_with(collator.as_ref(), a, b));
}

/// Deduplicate (case-sensitively, keeping the first occurrence) and sort with
/// [`compare_subjects`].
pub fn sort_subjects<I, S>(subjects: I) -> Vec<String>
where
  I: IntoIterator<Item = S>,
  S: Into<String>,
{
  let mut seen = HashSet::new();
  let mut out: Vec<String> = subjects
    .into_iter()
    .map(Into::into)
    .filter(|s| seen.insert(s.clone()))
    .collect();
  sort_subject_list(&mut out);
  out
}

/// Trim every entry, drop blanks, then [`sort_subjects`].
///
/// `"Math"` and `"math"` survive as two entries; only matching is
/// case-insensitive.
pub fn normalize_subjects<I, S>(subjects: I) -> Vec<String>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  sort_subjects(
    subjects
      .into_iter()
      .map(|s| s.as_ref().trim().to_owned())
      .filter(|s| !s.is_empty()),
  )
}

// ─── SubjectCategory ─────────────────────────────────────────────────────────

/// A named group of courses, with alternate keywords used by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectCategory {
  pub label:   String,
  pub tags:    Vec<String>,
  pub courses: Vec<String>,
}

impl SubjectCategory {
  /// Build a category; `courses` are deduplicated and sorted.
  pub fn new(label: &str, courses: &[&str], tags: &[&str]) -> Self {
    Self {
      label:   label.to_owned(),
      tags:    tags.iter().map(|t| (*t).to_owned()).collect(),
      courses: sort_subjects(courses.iter().copied()),
    }
  }

  fn matches_heading(&self, query: &str) -> bool {
    self.label.to_lowercase().contains(query)
      || self.tags.iter().any(|t| t.to_lowercase().contains(query))
  }
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// Filter `library` by a free-text query.
///
/// A blank query returns every category borrowed as-is. Otherwise a category
/// whose label or any tag contains the query is returned whole; failing that,
/// only its courses containing the query are kept, and the category is
/// dropped if none are. Matching is a case-insensitive substring test and the
/// original category and course order is preserved.
pub fn filter_catalog<'a>(
  library: &'a [SubjectCategory],
  query: &str,
) -> Vec<Cow<'a, SubjectCategory>> {
  let query = query.trim().to_lowercase();
  if query.is_empty() {
    return library.iter().map(Cow::Borrowed).collect();
  }

  library
    .iter()
    .filter_map(|category| {
      if category.matches_heading(&query) {
        return Some(Cow::Borrowed(category));
      }

      let courses: Vec<String> = category
        .courses
        .iter()
        .filter(|c| c.to_lowercase().contains(&query))
        .cloned()
        .collect();

      (!courses.is_empty()).then(|| {
        Cow::Owned(SubjectCategory {
          label: category.label.clone(),
          tags: category.tags.clone(),
          courses,
        })
      })
    })
    .collect()
}

// ─── Library ─────────────────────────────────────────────────────────────────

static LIBRARY: LazyLock<Vec<SubjectCategory>> = LazyLock::new(build_library);

/// The process-wide course catalog.
pub fn subject_library() -> &'static [SubjectCategory] { &LIBRARY }

fn build_library() -> Vec<SubjectCategory> {
  vec![
    SubjectCategory::new(
      "English",
      &[
        "English 9",
        "English 10",
        "American Literature",
        "British Literature",
        "Craft of Writing",
        "Dramatic Literature and Performance",
        "Gender in Literature",
        "Individual and Society in Literature",
        "Literary Non-fiction",
        "Literary Rule Breakers",
        "Literature and Art",
        "Literature and Film",
        "Literature of Migration",
        "Middle Eastern Literature",
        "Mythology",
        "Poetry",
        "Post-colonial Literature",
        "Shakespeare",
        "Special Topics in Literature",
      ],
      &[
        "English Language Arts",
        "ELA",
        "Grade 9 English",
        "Grade 10 English",
        "Grades 11-12 English",
      ],
    ),
    SubjectCategory::new(
      "Mathematics",
      &[
        "Algebra I",
        "Geometry with Algebra",
        "Geometry with Proof",
        "Algebra II Foundations",
        "Algebra II",
        "Algebra II with Trigonometry",
        "Precalculus with Statistics",
        "Precalculus with Analysis",
        "Precalculus with Calculus",
        "Calculus",
        "AP Calculus AB",
        "AP Calculus BC",
        "AP Statistics",
        "Advanced Math Seminar",
        "Financial Mathematics",
      ],
      &["Math", "Mathematics", "STEM"],
    ),
    SubjectCategory::new(
      "Science",
      &[
        "Integrated Science: The Universe from Atoms to Life",
        "Integrated Science: Life on a Changing Earth",
        "Advanced Independent Research Colloquium: Science",
        "AP Biology",
        "AP Chemistry",
        "AP Environmental Science",
        "AP Physics I",
        "AP Physics II",
        "AP Physics C",
        "Ecology Expeditions",
        "Anatomy & Physiology I",
        "Anatomy & Physiology II",
        "Organic Chemistry",
        "Inorganic Chemistry",
        "Astrophysics",
        "Physics & Engineering",
      ],
      &["STEM", "Lab Science", "Sciences"],
    ),
    SubjectCategory::new(
      "Social Studies",
      &[
        "World Civilizations I",
        "World Civilizations II",
        "US History",
        "AP US History",
        "AP Economics",
        "AP Human Geography",
        "AP Psychology",
        "AP European History",
        "AP Art History",
        "Advanced Independent Research Colloquium: Social Studies",
        "Human Rights Seminar",
        "Contemporary Global History",
        "Global Issues",
        "Introduction to Philosophy",
        "Introduction to Ethics and Moral Philosophy",
        "Race and Culture",
        "Research in Social Studies: Countercultures",
        "Topics in Government and Law",
      ],
      &["History", "Humanities", "Social Science"],
    ),
    SubjectCategory::new(
      "World Languages \u{2014} Arabic",
      &[
        "Arabic I",
        "Arabic II",
        "Arabic III",
        "Arabic IV",
        "Arabic V",
        "Advanced Arabic",
      ],
      &["World Languages", "Arabic"],
    ),
    SubjectCategory::new(
      "World Languages \u{2014} Chinese",
      &[
        "Chinese I",
        "Chinese II",
        "Chinese III",
        "Chinese IV",
        "Chinese V",
        "AP Chinese Language and Culture",
        "Chinese Language and Culture Seminar",
      ],
      &["World Languages", "Chinese", "Mandarin"],
    ),
    SubjectCategory::new(
      "World Languages \u{2014} French",
      &[
        "French I",
        "French II",
        "French III",
        "French IV",
        "French Culture and Language through Film and Media",
        "AP French Language and Culture",
        "Advanced French: Literature",
      ],
      &["World Languages", "French"],
    ),
    SubjectCategory::new(
      "World Languages \u{2014} Spanish",
      &[
        "Spanish I",
        "Spanish II",
        "Spanish III",
        "Spanish IV",
        "Spanish Culture and Language through Film and Media",
        "AP Spanish Language and Culture",
        "AP Spanish Literature and Culture",
      ],
      &["World Languages", "Spanish"],
    ),
    SubjectCategory::new(
      "Computer Science & Engineering",
      &[
        "Integrated Science Coding Lab",
        "Introduction to Programming",
        "Computer Science Principles",
        "Art and Code",
        "Design and Engineering",
        "Robotics",
        "AP Computer Science A",
        "Data Science and Machine Learning",
        "Computational Circuits",
        "Software Engineering",
        "Modeling and Simulation",
        "Advanced Design Thinking Apprenticeship",
      ],
      &["Computer Science", "Engineering", "CSED"],
    ),
    SubjectCategory::new(
      "Performing Arts \u{2014} Drama",
      &[
        "Play Production",
        "Acting for TV & Film",
        "Technical Theater Design",
        "Advanced Acting: TV and Film",
        "Advanced Acting: Play Production",
      ],
      &["Performing Arts", "Drama", "Theater"],
    ),
    SubjectCategory::new(
      "Performing Arts \u{2014} Dance",
      &["Dance"],
      &["Performing Arts", "Dance"],
    ),
    SubjectCategory::new(
      "Performing Arts \u{2014} Music",
      &[
        "Band",
        "Choir",
        "Orchestra",
        "Music Appreciation",
        "Digital Music",
        "AP Music Theory",
      ],
      &["Performing Arts", "Music"],
    ),
    SubjectCategory::new(
      "Visual Arts",
      &[
        "Foundations of Visual Arts",
        "Animating Images",
        "Art and Code",
        "Black and White Photography",
        "Ceramics",
        "Design and Engineering",
        "Digital Photography",
        "Digital Video Editing",
        "Drawing and Mixed Media",
        "Fashion Design",
        "Graphic Design",
        "Narrative Filmmaking",
        "Painting",
        "Sculpture",
        "Video Art",
        "Breaking Boundaries",
        "Meaning and Metaphor",
        "The Art of the Everyday",
        "Visual Storytelling",
        "Drawing and Painting Portfolio/AP",
        "Film and Video Portfolio",
        "Photography and Design Portfolio/AP",
        "Sculpture and Ceramics Portfolio/AP",
        "Independent Study",
      ],
      &["Art", "Fine Arts", "Visual Arts"],
    ),
    SubjectCategory::new(
      "Journalism & Publications",
      &[
        "Foundations of Journalism",
        "Advanced Journalism",
        "Advanced Journalism: Editors",
        "Publications Design: Yearbook",
        "Publications Design: Advanced",
        "Publications Design: Editors",
      ],
      &["Journalism", "Publications", "Media"],
    ),
    SubjectCategory::new(
      "Experiential Education",
      &[
        "Advanced Independent Research Colloquium",
        "Community Action Seminar",
        "Advanced Design Thinking Apprenticeship",
        "Peer Leadership",
        "Teaching Apprenticeship",
      ],
      &["Leadership", "Service Learning", "Experiential Learning"],
    ),
    SubjectCategory::new("Health", &["Health 9", "Health 10"], &["Wellness"]),
    SubjectCategory::new(
      "Physical Education",
      &[
        "Physical Education 9",
        "Physical Education 10",
        "Dance",
        "Lifetime Fitness",
        "Sports Leadership",
      ],
      &["PE", "Athletics", "Sports"],
    ),
  ]
}
