//! Keyword Taxonomy — static industry → keyword lookup.
//!
//! The tables are compile-time constants. Nothing writes to them after load,
//! so callers share them freely without synchronization.

use serde::{Deserialize, Serialize};

/// Industry identifier. Selects the keyword set and the prompt framing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    #[default]
    Technology,
    Healthcare,
    Finance,
    Marketing,
    Education,
    Consulting,
    Sales,
    Operations,
    Engineering,
    DataScience,
    Legal,
    HumanResources,
}

impl Industry {
    pub const ALL: [Industry; 12] = [
        Industry::Technology,
        Industry::Healthcare,
        Industry::Finance,
        Industry::Marketing,
        Industry::Education,
        Industry::Consulting,
        Industry::Sales,
        Industry::Operations,
        Industry::Engineering,
        Industry::DataScience,
        Industry::Legal,
        Industry::HumanResources,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Technology => "technology",
            Industry::Healthcare => "healthcare",
            Industry::Finance => "finance",
            Industry::Marketing => "marketing",
            Industry::Education => "education",
            Industry::Consulting => "consulting",
            Industry::Sales => "sales",
            Industry::Operations => "operations",
            Industry::Engineering => "engineering",
            Industry::DataScience => "data_science",
            Industry::Legal => "legal",
            Industry::HumanResources => "human_resources",
        }
    }

    /// Exact lookup after normalization: lowercase, `-` and spaces become `_`.
    pub fn from_id(id: &str) -> Option<Industry> {
        let normalized = id.trim().to_lowercase().replace(['-', ' '], "_");
        Industry::ALL
            .into_iter()
            .find(|industry| industry.as_str() == normalized)
    }

    /// Resolves a caller-supplied identifier. Unknown or missing identifiers
    /// fall back to the default industry.
    pub fn resolve(id: Option<&str>) -> Industry {
        id.and_then(Industry::from_id).unwrap_or_default()
    }
}

/// Returns the ordered keyword set for an industry. Never empty.
pub fn keywords_for(industry: Industry) -> &'static [&'static str] {
    match industry {
        Industry::Technology => TECHNOLOGY,
        Industry::Healthcare => HEALTHCARE,
        Industry::Finance => FINANCE,
        Industry::Marketing => MARKETING,
        Industry::Education => EDUCATION,
        Industry::Consulting => CONSULTING,
        Industry::Sales => SALES,
        Industry::Operations => OPERATIONS,
        Industry::Engineering => ENGINEERING,
        Industry::DataScience => DATA_SCIENCE,
        Industry::Legal => LEGAL,
        Industry::HumanResources => HUMAN_RESOURCES,
    }
}

const TECHNOLOGY: &[&str] = &[
    "JavaScript", "Python", "React", "Node.js", "AWS", "Docker", "Kubernetes", "SQL", "NoSQL",
    "API", "Machine Learning", "AI", "Cloud Computing", "DevOps", "Agile", "Scrum", "Git",
    "CI/CD", "Microservices", "GraphQL", "TypeScript", "Vue.js", "Angular", "MongoDB",
    "PostgreSQL", "Redis", "Elasticsearch", "TensorFlow", "PyTorch", "Blockchain",
    "Cybersecurity", "REST API", "Serverless", "Terraform", "Jenkins", "Kafka", "Spark",
    "Hadoop", "Data Science",
];

const HEALTHCARE: &[&str] = &[
    "Patient Care", "HIPAA", "Electronic Health Records", "Medical Terminology",
    "Clinical Research", "Healthcare Administration", "Medical Coding", "ICD-10", "CPT", "Epic",
    "Cerner", "FHIR", "Telemedicine", "Healthcare Quality", "Regulatory Compliance",
    "Medical Device", "Pharmacology", "Nursing", "Physical Therapy", "Radiology", "Laboratory",
    "Healthcare Analytics", "EMR", "Clinical Trials", "FDA Regulations", "Quality Assurance",
    "Patient Safety",
];

const FINANCE: &[&str] = &[
    "Financial Analysis", "Risk Management", "Investment Banking", "Portfolio Management",
    "Trading", "Bloomberg Terminal", "Financial Modeling", "Excel", "SQL", "Python", "R", "GAAP",
    "IFRS", "Compliance", "Anti-Money Laundering", "KYC", "Credit Analysis", "Derivatives",
    "Fixed Income", "Equity Research", "Valuation", "Mergers & Acquisitions", "Private Equity",
    "Hedge Funds", "Basel III", "Sarbanes-Oxley", "Financial Planning", "Treasury Management",
    "Audit",
];

const MARKETING: &[&str] = &[
    "Digital Marketing", "SEO", "SEM", "Social Media Marketing", "Content Marketing",
    "Email Marketing", "Google Analytics", "Google Ads", "Facebook Ads", "LinkedIn Ads",
    "Marketing Automation", "CRM", "Salesforce", "HubSpot", "A/B Testing",
    "Conversion Optimization", "Brand Management", "Market Research", "Customer Segmentation",
    "Lead Generation", "Marketing Strategy", "Influencer Marketing", "Affiliate Marketing",
    "Growth Hacking", "Customer Journey",
];

const EDUCATION: &[&str] = &[
    "Curriculum Development", "Instructional Design", "Learning Management Systems",
    "Blackboard", "Canvas", "Moodle", "Educational Technology", "Student Assessment",
    "Differentiated Instruction", "Classroom Management", "Special Education", "ESL",
    "Common Core", "IEP", "504 Plans", "Professional Development", "Data-Driven Instruction",
    "Educational Research", "Online Learning", "STEM Education", "Blended Learning",
    "Student Engagement", "Learning Analytics",
];

const CONSULTING: &[&str] = &[
    "Strategy Consulting", "Management Consulting", "Business Analysis", "Process Improvement",
    "Change Management", "Project Management", "Stakeholder Management", "Data Analysis",
    "PowerPoint", "Excel", "Tableau", "SQL", "Problem Solving", "Client Relations",
    "Industry Analysis", "Competitive Analysis", "Due Diligence", "Operational Excellence",
    "Digital Transformation", "Organizational Design", "Performance Management",
];

const SALES: &[&str] = &[
    "Sales Strategy", "Lead Generation", "Prospecting", "Cold Calling", "CRM", "Salesforce",
    "Account Management", "Customer Relationship Management", "Sales Forecasting",
    "Territory Management", "B2B Sales", "B2C Sales", "Inside Sales", "Outside Sales",
    "Sales Enablement", "Negotiation", "Closing Techniques", "Pipeline Management",
    "Sales Analytics", "Customer Success", "Revenue Growth", "Channel Sales", "Enterprise Sales",
    "Solution Selling",
];

const OPERATIONS: &[&str] = &[
    "Supply Chain Management", "Logistics", "Inventory Management", "Process Optimization",
    "Lean Manufacturing", "Six Sigma", "Quality Control", "Vendor Management", "Cost Reduction",
    "ERP Systems", "SAP", "Oracle", "Operations Research", "Data Analysis", "KPI Management",
    "Continuous Improvement", "Project Management", "Cross-functional Collaboration",
    "Warehouse Management", "Distribution", "Procurement", "Production Planning",
];

const ENGINEERING: &[&str] = &[
    "CAD", "SolidWorks", "AutoCAD", "MATLAB", "Simulation", "Design for Manufacturing", "DFM",
    "Product Development", "Project Management", "Quality Assurance", "Testing", "Prototyping",
    "Materials Science", "Mechanical Engineering", "Electrical Engineering", "Civil Engineering",
    "Chemical Engineering", "Environmental Engineering", "Safety Engineering",
    "Regulatory Compliance", "FEA", "CFD", "PLC Programming", "Control Systems", "Robotics",
    "Automation",
];

const DATA_SCIENCE: &[&str] = &[
    "Machine Learning", "Deep Learning", "Statistical Analysis", "Data Mining", "Big Data",
    "Python", "R", "SQL", "Tableau", "Power BI", "Hadoop", "Spark", "TensorFlow", "PyTorch",
    "Scikit-learn", "Pandas", "NumPy", "Data Visualization", "Predictive Modeling", "NLP",
    "Computer Vision", "A/B Testing", "Experimental Design", "Business Intelligence", "ETL",
    "Data Warehousing", "Cloud Platforms", "MLOps", "Feature Engineering",
];

const LEGAL: &[&str] = &[
    "Legal Research", "Contract Law", "Litigation", "Corporate Law", "Intellectual Property",
    "Compliance", "Regulatory Affairs", "Due Diligence", "Legal Writing", "Negotiation",
    "Case Management", "Discovery", "Depositions", "Trial Preparation", "Appeals",
    "Employment Law", "Real Estate Law", "Family Law", "Criminal Law", "Immigration Law",
    "Securities Law", "Tax Law", "Environmental Law", "Healthcare Law",
];

const HUMAN_RESOURCES: &[&str] = &[
    "Talent Acquisition", "Recruiting", "HRIS", "Workday", "SuccessFactors",
    "Performance Management", "Employee Relations", "Compensation & Benefits",
    "Training & Development", "Diversity & Inclusion", "Employment Law", "FMLA", "FLSA", "EEO",
    "HR Analytics", "Organizational Development", "Change Management", "Succession Planning",
    "Employee Engagement", "Onboarding", "Payroll", "Benefits Administration", "Labor Relations",
    "HR Strategy",
];
