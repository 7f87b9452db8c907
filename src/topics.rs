//! Built-in catalog of essay prompts handed out by `GET /get_topic`.

use rand::seq::SliceRandom;

const TOPICS: [&str; 50] = [
    // Technology and society
    "AI in Classrooms: Help or Hindrance?",
    "Teen Mental Health and Social Media Algorithms",
    "Fast Fashion vs. Sustainability: Who Pays the Real Price?",
    "Financial Literacy: Should It Be a Required High School Course?",
    "Remote & Hybrid Learning: What Should Stay?",
    "Data Privacy: How Much Should Apps Know About Us?",
    "E-Sports in Schools: Hobby or Legitimate Sport?",
    "Climate Action: Individual Choices vs. Policy Change",
    "News Literacy: Can Students Spot Misinformation?",
    "Gig Work & Micro-Internships: A New Path for Students?",
    "The Role of Drones in Modern Society",
    "How Video Games Influence Problem-Solving Skills",
    "Should Self-Driving Cars Be Allowed on All Roads?",
    "The Future of Artificial Organs in Medicine",
    "How Wearable Devices Affect Health Awareness",
    "The Impact of Space Tourism on Society",
    "Should Genetic Data Be Shared with Governments?",
    "How Coding Has Become a Modern Literacy Skill",
    "The Role of Robotics in Disaster Relief",
    "How Renewable Tech Is Changing Home Design",
    // Environment
    "Should Zoos Be Replaced by Wildlife Sanctuaries?",
    "The Impact of Urban Air Pollution on Children",
    "How Community Gardens Promote Sustainability",
    "Should Plastic Bags Be Completely Banned?",
    "The Role of Oceans in Regulating Global Climate",
    "How Wildfires Affect Local Communities",
    "Should Meat Consumption Be Reduced for the Planet?",
    "The Importance of Reforestation Programs",
    "How Renewable Energy Shapes Rural Economies",
    "Should Littering Fines Be Increased Worldwide?",
    // Culture
    "How Street Art Reflects Social Issues",
    "Should Schools Teach More About Local Folklore?",
    "The Role of Storytelling in Preserving History",
    "How Sports Celebrities Influence Teen Culture",
    "Should TV Shows Have Cultural Sensitivity Guidelines?",
    "The Impact of Cultural Festivals on Tourism",
    "How Photography Changes Perceptions of Reality",
    "Should More Schools Encourage Debate Clubs?",
    "The Role of Humor in Bringing Cultures Together",
    "How Fashion Reflects Social Identity",
    // Civics and education
    "Should Student Voting Be Allowed in School Decisions?",
    "How Political Debates Affect Young Voters",
    "The Role of Education in Reducing Poverty",
    "Should Teachers Have More Say in Policy-Making?",
    "How Scholarships Encourage Equal Access to Education",
    "The Role of Political Campaigns in Shaping Opinions",
    "Should More Schools Offer Classes on Media Literacy?",
    "How Education Systems Prepare Students for Democracy",
    "The Importance of Fair Representation in Politics",
    "Should International Students Pay the Same Fees as Locals?",
];

/// Read-only topic list. Cheap to copy; shared across requests.
#[derive(Debug, Clone, Copy)]
pub struct TopicCatalog {
    topics: &'static [&'static str],
}

impl TopicCatalog {
    pub fn builtin() -> Self {
        Self { topics: &TOPICS }
    }

    /// Uniform pick with replacement; repeats across calls are expected.
    pub fn random_topic(&self) -> &'static str {
        self.topics
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(TOPICS[0])
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.contains(&topic)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.topics.iter().copied()
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
