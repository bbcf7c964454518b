//! Pathophysiology of heart failure (HFrEF pathway) with its treatments.

use crate::components::pathway::geometry::Rect;
use crate::components::pathway::routing::{Lateral, RouteTable, Strategy};
use crate::components::pathway::{
	Category, CategoryId, ColorToken, Diagram, Edge, Intervention, Node,
};

/// Node shown in the detail panel when the page opens.
pub const DEFAULT_SELECTION: &str = "myocardial-injury";

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 2150.0;

/// The full heart failure pathway.
pub fn diagram() -> Diagram {
	Diagram {
		nodes: nodes(),
		edges: edges(),
		categories: categories(),
		routes: routes(),
		width: WIDTH,
		height: HEIGHT,
	}
}

fn categories() -> Vec<Category> {
	use CategoryId::*;
	use ColorToken::*;

	[
		(Factors, "Risk Factors", Orange200, Slate800),
		(Process, "Pathophysiological Process", White, Slate800),
		(SignsSymptoms, "Clinical Signs & Symptoms", Red500, White),
		(Management, "Pharmacological Mgt.", Amber400, Slate800),
		(NonPharmManagement, "Non-Pharmacological Mgt.", Cyan400, Slate800),
		(PositiveOutcomes, "Positive Outcomes", Emerald200, Slate800),
		(NegativeOutcomes, "Disease Progression", Slate300, Slate800),
	]
	.into_iter()
	.map(|(id, name, fill, text)| Category {
		id,
		display_name: name.into(),
		fill,
		text,
	})
	.collect()
}

fn nodes() -> Vec<Node> {
	use CategoryId::*;

	vec![
		// Factors
		Node::new("predisposing-factors", Rect::new(20.0, 20.0, 380.0, 160.0), Factors, &[
			"Predisposing Factors",
			"(Chronic Conditions)",
		])
		.examples(&[
			"• Coronary Artery Disease",
			"• Hypertension",
			"• Valvular Disease",
			"• Diabetes Mellitus",
		])
		.explanation(
			"Long-term conditions that structurally or functionally impair the heart over time, \
			 setting the stage for heart failure. These factors weaken the heart muscle or increase \
			 its chronic workload.",
		)
		.interventions(
			vec![
				Intervention::new(
					"Antihypertensives",
					"Tight blood pressure control lowers afterload and slows hypertensive heart disease.",
				),
				Intervention::new(
					"Statins & Antiplatelets",
					"Secondary prevention of coronary artery disease limits further ischemic injury.",
				),
			],
			vec![Intervention::new(
				"Risk Factor Screening",
				"Regular review of blood pressure, glucose and lipids catches modifiable risk early.",
			)],
		),
		Node::new("precipitating-factors", Rect::new(560.0, 20.0, 380.0, 180.0), Factors, &[
			"Precipitating Factors",
			"(Acute Triggers - \"FAILURE\")",
		])
		.examples(&[
			"• Forgot Meds / Non-compliance",
			"• Arrhythmia / Anemia",
			"• Ischemia / Infection",
			"• Lifestyle (↑ Salt/Fluid)",
			"• Uncontrolled Hypertension",
			"• Renal Failure / Embolism",
		])
		.explanation(
			"Acute events or conditions that place new, sudden stress on an already compromised \
			 heart, often leading to a rapid worsening of symptoms (acute decompensation). The \
			 \"FAILURE\" mnemonic is often used to remember these.",
		)
		.interventions(
			Vec::new(),
			vec![Intervention::new(
				"Adherence Education",
				"Missed medication and dietary indiscretion are the most common avoidable triggers.",
			)],
		),
		// Core pathophysiology
		Node::new("myocardial-injury", Rect::new(280.0, 240.0, 380.0, 70.0), Process, &[
			"Initial Myocardial Injury",
			"or Stress",
		])
		.explanation(
			"An event or chronic condition that impairs the heart's ability to pump blood \
			 effectively. This can be a direct injury (e.g., heart attack) or the cumulative effect \
			 of chronic factors (e.g., hypertension). This leads to **systolic dysfunction** \
			 (impaired contraction, causing HFrEF) or **diastolic dysfunction** (impaired \
			 relaxation/filling, causing HFpEF). This diagram primarily illustrates the HFrEF \
			 pathway.",
		),
		Node::new("decreased-co", Rect::new(280.0, 340.0, 380.0, 70.0), Process, &[
			"Decreased Cardiac Output",
			"& Blood Pressure",
		])
		.explanation(
			"The weakened heart pumps less blood out to the body, leading to a drop in cardiac \
			 output and systemic blood pressure. The body perceives this as a state of circulatory \
			 collapse and activates compensatory mechanisms.",
		),
		Node::new("sns-activation", Rect::new(20.0, 450.0, 280.0, 110.0), Process, &[
			"Sympathetic Nervous System",
			"(SNS) Activation",
			"• ↑ Heart Rate & Contractility",
			"• Vasoconstriction",
		])
		.explanation(
			"The body's \"fight or flight\" response is triggered to maintain blood pressure. It \
			 increases heart rate and the force of contraction, and constricts peripheral blood \
			 vessels. While helpful initially, this significantly increases the heart's workload \
			 and oxygen demand long-term. This harmful effect is targeted by **Beta-blocker** \
			 medications.",
		)
		.interventions(
			vec![
				Intervention::new(
					"Beta-blockers",
					"Metoprolol succinate, bisoprolol or carvedilol slow the heart rate and reduce \
					 oxygen demand; titrated slowly from a low dose.",
				),
				Intervention::new(
					"Ivabradine",
					"Added when resting heart rate stays high despite the maximum tolerated \
					 beta-blocker dose.",
				),
			],
			Vec::new(),
		),
		Node::new("frank-starling-mechanism", Rect::new(330.0, 450.0, 280.0, 110.0), Process, &[
			"Frank-Starling",
			"Mechanism",
		])
		.explanation(
			"Increased filling volumes dilate the heart, enhancing contractility and stroke \
			 volume. Initially, this helps maintain cardiac output. However, this dilation comes at \
			 the expense of increased wall tension and higher oxygen demand on an already \
			 compromised myocardium, eventually contributing to worsening failure.",
		),
		Node::new("raas-activation", Rect::new(640.0, 450.0, 280.0, 110.0), Process, &[
			"Renin-Angiotensin-Aldosterone",
			"System (RAAS) Activation",
			"• Angiotensin II → Vaso.",
			"• Aldosterone → Na+ & H₂O",
		])
		.explanation(
			"The kidneys respond to low blood flow by activating the RAAS cascade. This leads to \
			 potent vasoconstriction and hormonal signals (aldosterone) that cause the body to \
			 retain salt and water, increasing blood volume. This maladaptive system is a primary \
			 target for medications like **ACE Inhibitors, ARBs, and Aldosterone Antagonists**.",
		)
		.interventions(
			vec![
				Intervention::new(
					"ACE Inhibitors / ARBs",
					"Enalapril or losartan block angiotensin II, relaxing vessels and limiting \
					 remodeling.",
				),
				Intervention::new(
					"ARNI",
					"Sacubitril/valsartan adds neprilysin inhibition and can replace an ACE \
					 inhibitor or ARB.",
				),
				Intervention::new(
					"Aldosterone Antagonists",
					"Spironolactone or eplerenone reduce salt retention and myocardial fibrosis.",
				),
			],
			vec![Intervention::new(
				"Sodium Restriction",
				"Less dietary salt blunts the fluid retention driven by aldosterone.",
			)],
		),
		Node::new("increased-workload", Rect::new(280.0, 600.0, 380.0, 70.0), Process, &[
			"Increased Cardiac Workload,",
			"Preload, and Afterload",
		])
		.explanation(
			"The compensatory mechanisms lead to a vicious cycle. The heart must pump more blood \
			 (increased preload), against higher pressure (increased afterload), and at a faster \
			 rate (increased workload), causing further stress and damage.",
		),
		Node::new("cardiac-remodeling", Rect::new(280.0, 700.0, 380.0, 80.0), Process, &[
			"Maladaptive Cardiac Remodeling",
			"(e.g., Hypertrophy, Dilation)",
		])
		.explanation(
			"Over time, the chronic stress causes the heart muscle to change its size and shape in \
			 an attempt to compensate. This remodeling (e.g., thickening of walls, enlargement of \
			 chambers) ultimately disrupts normal function, stiffens the heart, and further \
			 impairs its pumping ability.\n\nThe dashed loop back to decreased cardiac output marks \
			 the vicious cycle.",
		),
		Node::new("worsening-hf", Rect::new(280.0, 810.0, 380.0, 70.0), Process, &[
			"Progressive Worsening",
			"of Pump Function",
		])
		.explanation(
			"The ongoing cycle of injury, harmful compensation, and maladaptive remodeling leads to \
			 a steady decline in the heart's ability to function as an effective pump, leading to \
			 the clinical syndrome of heart failure.",
		),
		// Clinical syndromes
		Node::new("pulmonary-congestion", Rect::new(20.0, 920.0, 380.0, 70.0), Process, &[
			"Pulmonary Congestion",
			"(Left-Sided Failure)",
		])
		.explanation(
			"When the left ventricle fails to pump blood forward to the body, it backs up into the \
			 pulmonary circulation. This increases pressure in the lung's blood vessels, causing \
			 fluid to leak into lung tissue and airspaces.",
		)
		.interventions(
			vec![Intervention::new(
				"Loop Diuretics",
				"Furosemide, given IV in acute decompensation, clears pulmonary edema.",
			)],
			vec![
				Intervention::new(
					"Upright Positioning",
					"High Fowler's position eases the work of breathing.",
				),
				Intervention::new(
					"Oxygen Therapy",
					"Supplemental oxygen when saturation is low.",
				),
			],
		),
		Node::new("systemic-congestion", Rect::new(560.0, 920.0, 380.0, 70.0), Process, &[
			"Systemic Venous Congestion",
			"(Right-Sided Failure)",
		])
		.explanation(
			"When the right ventricle fails to pump blood forward to the lungs, it backs up in the \
			 systemic venous circulation. This is most commonly a consequence of chronic left-sided \
			 failure creating high pressure in the pulmonary circuit. Isolated right-sided failure, \
			 often due to lung disease, is termed cor pulmonale. The increased venous pressure \
			 leads to fluid accumulation in the body's tissues and organs.",
		)
		.interventions(
			vec![Intervention::new(
				"Diuretics",
				"Reduce venous volume, relieving edema, hepatic congestion and ascites.",
			)],
			vec![
				Intervention::new("Leg Elevation", "Helps mobilize dependent edema."),
				Intervention::new(
					"Daily Weights",
					"A gain of more than 1 kg in a day signals fluid retention.",
				),
			],
		),
		// Manifestations
		Node::new("left-sided-symptoms", Rect::new(20.0, 1050.0, 300.0, 120.0), SignsSymptoms, &[
			"Left-Sided Manifestations:",
			"• Dyspnea & Crackles",
			"• Orthopnea",
			"• Paroxysmal Nocturnal Dyspnea",
		])
		.explanation(
			"Classic symptoms resulting from pulmonary congestion. Includes shortness of breath \
			 (dyspnea), difficulty breathing when lying flat (orthopnea), and waking up at night \
			 gasping for air (PND).",
		),
		Node::new("low-output-symptoms", Rect::new(340.0, 1050.0, 300.0, 120.0), SignsSymptoms, &[
			"Low Output Symptoms:",
			"• Fatigue & Weakness",
			"• Cool Extremities",
		])
		.explanation(
			"These symptoms are caused by the heart's inability to deliver adequate oxygenated \
			 blood to the muscles and other tissues, leading to a general feeling of tiredness and \
			 poor perfusion.",
		),
		Node::new("right-sided-symptoms", Rect::new(660.0, 1050.0, 300.0, 120.0), SignsSymptoms, &[
			"Right-Sided Manifestations:",
			"• Peripheral Edema",
			"• Jugular Venous Distension (JVD)",
			"• Hepatomegaly, Ascites",
		])
		.explanation(
			"Hallmark signs of systemic fluid overload. Includes swelling in the legs/ankles \
			 (edema), visible bulging of neck veins (JVD), and fluid accumulation in the liver and \
			 abdomen.",
		),
		Node::new("clinical-syndrome", Rect::new(280.0, 1210.0, 380.0, 70.0), Process, &[
			"Clinical Syndrome of",
			"Heart Failure",
		])
		.explanation(
			"The combination of left-sided, right-sided, and low-output signs and symptoms \
			 constitutes the clinical presentation of heart failure, which prompts therapeutic \
			 intervention.",
		),
		// Management
		Node::new(
			"non-pharmacological-management",
			Rect::new(280.0, 1320.0, 380.0, 160.0),
			NonPharmManagement,
			&[
				"Non-Pharmacological Mgt.",
				"• Dietary Modification",
				"• Activity and Exercise",
				"• Weight Management",
				"• Lifestyle / Risk Control",
				"• Patient Education",
			],
		)
		.explanation(
			"Cornerstone interventions that empower the patient and are essential for long-term \
			 success. They work in tandem with medications to reduce symptoms and prevent \
			 progression.",
		)
		.interventions(
			Vec::new(),
			vec![
				Intervention::new(
					"Dietary Modification",
					"A low-sodium diet reduces water retention, which decreases blood volume \
					 (preload) and eases congestion. Fluid restriction may be needed in severe \
					 cases.",
				),
				Intervention::new(
					"Activity and Exercise",
					"Graded, regular exercise improves functional capacity. Rest periods conserve \
					 energy and prevent overexertion.",
				),
				Intervention::new(
					"Weight Management",
					"Daily weight monitoring detects early fluid retention; an ideal body weight \
					 reduces cardiac workload.",
				),
				Intervention::new(
					"Lifestyle Control",
					"Smoking cessation improves oxygenation; limiting alcohol prevents further \
					 muscle damage.",
				),
				Intervention::new(
					"Education",
					"Patients and families learn to monitor symptoms, adhere to treatment and \
					 recognize when to seek help.",
				),
			],
		),
		Node::new(
			"pharmacological-management",
			Rect::new(280.0, 1510.0, 380.0, 160.0),
			Management,
			&[
				"Pharmacological Management",
				"• Reduce Preload/Symptoms",
				"• Block RAAS & SNS Activation",
				"• Address Comorbidities",
			],
		)
		.explanation(
			"Treatment targets the vicious cycle of heart failure. Each medication class interrupts \
			 a specific step:\n\n**1. Reduce Fluid Overload (Preload):**\n• Diuretics relieve \
			 congestion.\n\n**2. Block Neurohormonal Activation:**\n• ACE inhibitors, ARBs and \
			 aldosterone antagonists block RAAS.\n• Beta-blockers block the SNS.\n\n**3. Other Key \
			 Medications:**\n• SGLT2 inhibitors and, in select cases, inotropes.",
		)
		.interventions(
			vec![
				Intervention::new(
					"Diuretics (e.g., Furosemide)",
					"Remove excess salt and water to decrease blood volume, relieving pulmonary and \
					 systemic congestion.",
				),
				Intervention::new(
					"ACE Inhibitors & ARBs",
					"Block the RAAS, reducing afterload and fluid retention and helping reverse \
					 remodeling.",
				),
				Intervention::new(
					"Beta-blockers (e.g., Metoprolol)",
					"Block the SNS, slowing the heart rate and reducing workload and oxygen demand.",
				),
				Intervention::new(
					"Aldosterone Antagonists (e.g., Spironolactone)",
					"Reduce fluid retention and prevent cardiac fibrosis.",
				),
				Intervention::new(
					"SGLT2 Inhibitors (e.g., Dapagliflozin)",
					"Remove glucose and fluid via urine, reducing preload and protecting heart and \
					 kidneys.",
				),
				Intervention::new(
					"Inotropes (e.g., Digoxin)",
					"Used in select cases to increase the heart's pumping strength.",
				),
			],
			Vec::new(),
		),
		// Outcomes
		Node::new("positive-outcomes", Rect::new(280.0, 1720.0, 380.0, 120.0), PositiveOutcomes, &[
			"Positive Outcomes",
			"(Goals of Therapy)",
			"• Symptom Control",
			"• Improved Quality of Life",
			"• Reduced Hospitalizations",
		])
		.explanation(
			"Effective management aims to halt the progression of heart failure. By targeting the \
			 underlying mechanisms, treatments can significantly reduce symptoms, decrease the \
			 frequency of hospital admissions for acute decompensation, improve the patient's \
			 ability to perform daily activities, and ultimately prolong survival.",
		),
		Node::new("end-stage-hf", Rect::new(280.0, 1900.0, 380.0, 120.0), NegativeOutcomes, &[
			"Progression to",
			"End-Stage HF",
			"• Refractory Symptoms",
			"• Palliative Care",
			"• Advanced Therapies",
		])
		.explanation(
			"Despite optimal medical therapy, heart failure can progress to an advanced stage where \
			 symptoms are severe and persistent at rest. At this point, the focus of care may shift \
			 towards palliative measures to manage symptoms and improve comfort, or considering \
			 advanced therapies such as heart transplantation or mechanical circulatory support \
			 (e.g., LVAD) for eligible candidates.",
		)
		.interventions(
			vec![Intervention::new(
				"IV Inotropes",
				"Continuous infusion as a bridge to advanced therapy or for symptom relief.",
			)],
			vec![
				Intervention::new(
					"Palliative Care",
					"Focus on comfort, symptom relief and goals-of-care discussions.",
				),
				Intervention::new(
					"Advanced Therapies",
					"Heart transplantation or a left ventricular assist device for eligible \
					 patients.",
				),
			],
		),
	]
}

fn edges() -> Vec<Edge> {
	vec![
		Edge::new("predisposing-factors", "myocardial-injury"),
		Edge::new("precipitating-factors", "myocardial-injury"),
		Edge::new("myocardial-injury", "decreased-co"),
		Edge::new("decreased-co", "sns-activation"),
		Edge::new("decreased-co", "raas-activation"),
		Edge::new("decreased-co", "frank-starling-mechanism"),
		Edge::new("sns-activation", "increased-workload"),
		Edge::new("raas-activation", "increased-workload"),
		Edge::new("frank-starling-mechanism", "increased-workload"),
		Edge::new("increased-workload", "cardiac-remodeling"),
		Edge::new("cardiac-remodeling", "worsening-hf"),
		Edge::new("cardiac-remodeling", "decreased-co").dashed().feedback(),
		Edge::new("worsening-hf", "pulmonary-congestion"),
		Edge::new("worsening-hf", "low-output-symptoms"),
		Edge::new("pulmonary-congestion", "left-sided-symptoms"),
		Edge::new("pulmonary-congestion", "systemic-congestion"),
		Edge::new("systemic-congestion", "right-sided-symptoms"),
		Edge::new("left-sided-symptoms", "clinical-syndrome"),
		Edge::new("right-sided-symptoms", "clinical-syndrome"),
		Edge::new("low-output-symptoms", "clinical-syndrome"),
		Edge::new("clinical-syndrome", "non-pharmacological-management"),
		Edge::new("clinical-syndrome", "pharmacological-management"),
		Edge::new("pharmacological-management", "positive-outcomes"),
		Edge::new("non-pharmacological-management", "positive-outcomes"),
		Edge::new("worsening-hf", "end-stage-hf").dashed(),
	]
}

fn rail(rail_drop: f64, target_fraction: f64) -> Strategy {
	Strategy::RailFan {
		rail_drop,
		target_fraction,
	}
}

/// Hand-tuned routes for every pair whose generic route would cut through
/// a node or arrive sideways.
pub fn routes() -> RouteTable {
	RouteTable::new()
		.with("predisposing-factors", "myocardial-injury", rail(30.0, 0.25))
		.with("precipitating-factors", "myocardial-injury", rail(20.0, 0.75))
		// Compensatory mechanisms fan out from a rail below decreased CO
		// and converge onto the top of increased workload.
		.with("decreased-co", "sns-activation", rail(20.0, 0.5))
		.with("decreased-co", "frank-starling-mechanism", rail(20.0, 0.5))
		.with("decreased-co", "raas-activation", rail(20.0, 0.5))
		.with("sns-activation", "increased-workload", rail(20.0, 0.2))
		.with("raas-activation", "increased-workload", rail(20.0, 0.8))
		// Vicious cycle, kept clear of the RAAS box.
		.with(
			"cardiac-remodeling",
			"decreased-co",
			Strategy::CLoop {
				lateral: Lateral::Right,
				reach: 290.0,
			},
		)
		.with("worsening-hf", "pulmonary-congestion", rail(20.0, 0.5))
		.with("worsening-hf", "low-output-symptoms", rail(20.0, 0.5))
		.with(
			"worsening-hf",
			"end-stage-hf",
			Strategy::Bypass {
				obstacles: vec!["pulmonary-congestion".into(), "left-sided-symptoms".into()],
				lateral: Lateral::Left,
				clearance: 10.0,
				lead: 30.0,
				target_fraction: 0.5,
			},
		)
		.fan(
			&[
				("left-sided-symptoms", 0.25),
				("low-output-symptoms", 0.5),
				("right-sided-symptoms", 0.75),
			],
			"clinical-syndrome",
			30.0,
		)
		.with("clinical-syndrome", "non-pharmacological-management", Strategy::Drop)
		.with(
			"clinical-syndrome",
			"pharmacological-management",
			Strategy::Bypass {
				obstacles: vec!["non-pharmacological-management".into()],
				lateral: Lateral::Right,
				clearance: 60.0,
				lead: 20.0,
				target_fraction: 0.75,
			},
		)
		.with("pharmacological-management", "positive-outcomes", rail(25.0, 0.65))
		.with(
			"non-pharmacological-management",
			"positive-outcomes",
			Strategy::Bypass {
				obstacles: vec!["pharmacological-management".into()],
				lateral: Lateral::Left,
				clearance: 60.0,
				lead: 15.0,
				target_fraction: 0.35,
			},
		)
}
