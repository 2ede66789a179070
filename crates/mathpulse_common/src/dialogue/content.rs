//! Static tutoring content keyed by topic and kind.
//!
//! Coverage (anything missing falls back to the derivatives entry):
//!
//! | Topic        | Examples | Practice | Explanation | Clarification | Introduction |
//! |--------------|----------|----------|-------------|---------------|--------------|
//! | derivatives  | yes      | yes      | yes         | yes           | yes          |
//! | chain_rule   | yes      | yes      | yes         | -             | yes          |
//! | integrals    | yes      | yes      | yes         | -             | yes          |
//! | limits       | yes      | yes      | yes         | -             | yes          |
//! | quadratic    | yes      | yes      | yes         | -             | yes          |
//! | trigonometry | yes      | -        | yes         | -             | -            |
//! | algebra      | -        | -        | -           | -             | -            |
//! | logarithms   | -        | -        | -           | -             | -            |
//!
//! The wording is user-facing. Change it deliberately.

use super::topics::Topic;
use serde::{Deserialize, Serialize};

/// Kind of canned content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Examples,
    Practice,
    Explanation,
    Clarification,
    /// Short first answer to a new question about the topic
    Introduction,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Examples,
        ContentKind::Practice,
        ContentKind::Explanation,
        ContentKind::Clarification,
        ContentKind::Introduction,
    ];
}

/// Dedicated content for (topic, kind), if the library has it
pub fn lookup(topic: Topic, kind: ContentKind) -> Option<&'static str> {
    use ContentKind::*;

    let body = match (topic, kind) {
        (Topic::Derivatives, Examples) => DERIVATIVE_EXAMPLES,
        (Topic::Derivatives, Practice) => DERIVATIVE_PRACTICE,
        (Topic::Derivatives, Explanation) => DERIVATIVE_EXPLANATION,
        (Topic::Derivatives, Clarification) => DERIVATIVE_CLARIFICATION,
        (Topic::Derivatives, Introduction) => DERIVATIVE_INTRO,

        (Topic::ChainRule, Examples) => CHAIN_RULE_EXAMPLES,
        (Topic::ChainRule, Practice) => CHAIN_RULE_PRACTICE,
        (Topic::ChainRule, Explanation) => CHAIN_RULE_EXPLANATION,
        (Topic::ChainRule, Introduction) => CHAIN_RULE_INTRO,

        (Topic::Integrals, Examples) => INTEGRAL_EXAMPLES,
        (Topic::Integrals, Practice) => INTEGRAL_PRACTICE,
        (Topic::Integrals, Explanation) => INTEGRAL_EXPLANATION,
        (Topic::Integrals, Introduction) => INTEGRAL_INTRO,

        (Topic::Limits, Examples) => LIMIT_EXAMPLES,
        (Topic::Limits, Practice) => LIMIT_PRACTICE,
        (Topic::Limits, Explanation) => LIMIT_EXPLANATION,
        (Topic::Limits, Introduction) => LIMIT_INTRO,

        (Topic::Quadratic, Examples) => QUADRATIC_EXAMPLES,
        (Topic::Quadratic, Practice) => QUADRATIC_PRACTICE,
        (Topic::Quadratic, Explanation) => QUADRATIC_EXPLANATION,
        (Topic::Quadratic, Introduction) => QUADRATIC_INTRO,

        (Topic::Trigonometry, Examples) => TRIG_EXAMPLES,
        (Topic::Trigonometry, Explanation) => TRIG_EXPLANATION,

        _ => return None,
    };

    Some(body)
}

/// Content for (topic, kind), falling back to the derivatives entry
pub fn body(topic: Topic, kind: ContentKind) -> &'static str {
    lookup(topic, kind)
        .or_else(|| lookup(Topic::Derivatives, kind))
        .unwrap_or(DERIVATIVE_EXAMPLES)
}

// === Derivatives ===

const DERIVATIVE_INTRO: &str = "The derivative measures how a function changes as its input changes. Think of it as the 'instantaneous rate of change' or the slope of the tangent line at any point. For example, if f(x) = x², then f'(x) = 2x. Would you like me to walk through more examples?";

const DERIVATIVE_EXAMPLES: &str = "Great! Here are more derivative examples:

**Power Rule:** If f(x) = xⁿ, then f'(x) = n·xⁿ⁻¹
• f(x) = x³ → f'(x) = 3x²
• f(x) = x⁵ → f'(x) = 5x⁴

**Constant Multiple:** If f(x) = c·g(x), then f'(x) = c·g'(x)
• f(x) = 4x² → f'(x) = 8x

**Sum Rule:** The derivative of a sum is the sum of derivatives
• f(x) = x³ + 2x → f'(x) = 3x² + 2

Would you like to try a practice problem, or should I explain the chain rule next?";

const DERIVATIVE_PRACTICE: &str = "Let's practice! Try this one:

**Problem:** Find the derivative of f(x) = 3x⁴ - 5x² + 7x - 2

**Hints:**
• Use the power rule on each term: d/dx[xⁿ] = n·xⁿ⁻¹
• The derivative of a constant is 0

Take your time, then tell me your answer and I'll check it.";

const DERIVATIVE_EXPLANATION: &str = "Let's go through derivatives step by step.

**1. The big idea**
A derivative measures how fast a function's output changes when its input changes. On a graph, it's the slope of the tangent line at a point.

**2. The definition**
f'(x) = [f(x + h) - f(x)] / h as h shrinks toward 0
This is the slope between two points that slide infinitely close together.

**3. The shortcut rules**
• Power rule: d/dx[xⁿ] = n·xⁿ⁻¹
• Constant rule: d/dx[c] = 0
• Sum rule: differentiate term by term

**4. Putting it together**
For f(x) = x³ + 4x, f'(x) = 3x² + 4.

Would you like to try a practice problem next?";

const DERIVATIVE_CLARIFICATION: &str = "No problem, let's look at derivatives another way.

Imagine you're driving a car. Your position changes over time, and the speedometer tells you how fast it's changing at this exact moment. That speedometer reading is the derivative.

**In math terms:**
• f'(x) is the slope of the curve at the point x
• A large derivative means the function is changing quickly
• A derivative of 0 means the function is momentarily flat

**Quick check:** for f(x) = x², the slope at x = 3 is f'(3) = 2·3 = 6.

Which part feels unclear: the idea of slope, the notation, or the rules for computing it?";

// === Chain rule ===

const CHAIN_RULE_INTRO: &str = "The chain rule is used when you have a function inside another function (composition). If y = f(g(x)), then dy/dx = f'(g(x)) × g'(x). Think of it as 'derivative of the outside × derivative of the inside'. What specific problem are you working on?";

const CHAIN_RULE_EXAMPLES: &str = "Here are step-by-step chain rule examples:

**Example 1:** f(x) = (2x + 1)³
• Outer function: u³, Inner function: u = 2x + 1
• f'(x) = 3(2x + 1)² × 2 = 6(2x + 1)²

**Example 2:** f(x) = sin(x²)
• Outer: sin(u), Inner: u = x²
• f'(x) = cos(x²) × 2x = 2x·cos(x²)

**Example 3:** f(x) = √(3x - 5) = (3x - 5)^(1/2)
• f'(x) = (1/2)(3x - 5)^(-1/2) × 3 = 3/(2√(3x - 5))

Want to try one yourself? How about finding the derivative of (x² + 1)⁴?";

const CHAIN_RULE_PRACTICE: &str = "Here's a chain rule problem for you:

**Problem:** Find the derivative of f(x) = (x² + 1)⁴

**Hints:**
• Identify the outer function u⁴ and the inner function u = x² + 1
• Multiply the derivative of the outside by the derivative of the inside

Work it out and share your answer. I'll go through it with you step by step!";

const CHAIN_RULE_EXPLANATION: &str = "Here's the chain rule broken down step by step.

**1. When to use it**
Whenever one function is nested inside another, like (3x + 2)⁵ or √(x² + 1).

**2. The rule**
If y = f(g(x)), then dy/dx = f'(g(x)) · g'(x).

**3. The recipe**
• Identify the outer function and the inner function
• Differentiate the outer function, leaving the inside alone
• Multiply by the derivative of the inside

**4. Quick check**
For y = (3x + 2)⁵: dy/dx = 5(3x + 2)⁴ · 3 = 15(3x + 2)⁴

Would you like to try one on your own?";

// === Integrals ===

const INTEGRAL_INTRO: &str = "Integration is the reverse of differentiation. While derivatives give us rates of change, integrals help us find areas under curves and accumulate quantities. The basic rule: ∫xⁿ dx = xⁿ⁺¹/(n+1) + C. What would you like to integrate?";

const INTEGRAL_EXAMPLES: &str = "Here are integration examples using the power rule:

**Power Rule for Integrals:** ∫xⁿ dx = xⁿ⁺¹/(n+1) + C

**Examples:**
• ∫x² dx = x³/3 + C
• ∫x⁴ dx = x⁵/5 + C
• ∫1/x² dx = ∫x⁻² dx = -1/x + C

**With constants:**
• ∫3x² dx = 3 · x³/3 + C = x³ + C
• ∫(2x + 5) dx = x² + 5x + C

Remember: Always add the constant C for indefinite integrals! Would you like to explore definite integrals or integration by substitution?";

const INTEGRAL_PRACTICE: &str = "Time to practice integration!

**Problem:** Evaluate ∫(4x³ + 6x - 1) dx

**Hints:**
• Integrate each term separately using ∫xⁿ dx = xⁿ⁺¹/(n+1) + C
• Don't forget the constant of integration!

Send me your answer when you're ready and I'll check it.";

const INTEGRAL_EXPLANATION: &str = "Let's walk through integrals step by step.

**1. The big idea**
An integral adds up infinitely many tiny pieces. The definite integral ∫ₐᵇ f(x) dx gives the area under the curve from a to b.

**2. Reversing derivatives**
An antiderivative F(x) is a function whose derivative is f(x). That's why integration undoes differentiation.

**3. Core rules**
• Power rule: ∫xⁿ dx = xⁿ⁺¹/(n+1) + C (n ≠ -1)
• Constant multiple: ∫c·f(x) dx = c∫f(x) dx
• Sum rule: integrate term by term

**4. Fundamental Theorem of Calculus**
∫ₐᵇ f(x) dx = F(b) - F(a)

Would you like to practice with a few problems?";

// === Limits ===

const LIMIT_INTRO: &str = "Limits describe what value a function approaches as the input gets closer to some value. We write it as lim(x→a) f(x) = L. Limits are the foundation of calculus - they help us define derivatives and integrals precisely. What limit are you trying to solve?";

const LIMIT_EXAMPLES: &str = "Here are more limit examples:

**Direct Substitution (when possible):**
• lim(x→2) (x² + 3) = 4 + 3 = 7

**When you get 0/0 (indeterminate form), try factoring:**
• lim(x→3) (x² - 9)/(x - 3)
• = lim(x→3) (x+3)(x-3)/(x-3)
• = lim(x→3) (x + 3) = 6

**Limits at infinity:**
• lim(x→∞) (3x² + 2)/(x² - 1) = 3 (compare highest powers)

**Important limit:**
• lim(x→0) sin(x)/x = 1 (this one you just memorize!)

Would you like to practice evaluating some limits together?";

const LIMIT_PRACTICE: &str = "Let's practice limits!

**Problem:** Evaluate lim(x→4) (x² - 16)/(x - 4)

**Hints:**
• Direct substitution gives 0/0, so look for a factor to cancel
• x² - 16 is a difference of squares

Give it a go and tell me what you get!";

const LIMIT_EXPLANATION: &str = "Here's how limits work, step by step.

**1. The big idea**
A limit describes the value a function gets closer and closer to as x approaches some number, even if the function never actually reaches it.

**2. Notation**
lim(x→a) f(x) = L means f(x) can be made as close to L as we like by taking x close enough to a.

**3. How to evaluate**
• Try direct substitution first
• If you get 0/0, factor and cancel or rationalize
• For x→∞, compare the highest powers in the numerator and denominator

**4. Why it matters**
Limits are the foundation for derivatives and integrals.

Would you like to work through a practice problem?";

// === Quadratic equations ===

const QUADRATIC_INTRO: &str = "A quadratic equation has the form ax² + bx + c = 0, and its graph is a U-shaped curve called a parabola. You can solve it by factoring, completing the square, or using the quadratic formula: x = (-b ± √(b² - 4ac)) / 2a. Would you like to see a few worked examples?";

const QUADRATIC_EXAMPLES: &str = "Here are some quadratic equation examples:

**Factoring:**
• x² - 7x + 12 = 0 → (x - 3)(x - 4) = 0 → x = 3 or x = 4

**Quadratic formula:**
• 2x² + 3x - 2 = 0 → x = (-3 ± √(9 + 16)) / 4 = (-3 ± 5) / 4
• So x = 1/2 or x = -2

**Completing the square:**
• x² + 6x + 5 = 0 → (x + 3)² = 4 → x = -1 or x = -5

Would you like to try a practice problem?";

const QUADRATIC_PRACTICE: &str = "Here's a quadratic equation to practice:

**Problem:** Solve x² - 5x + 6 = 0

**Hints:**
• Look for two numbers that multiply to 6 and add to -5
• Or use the quadratic formula: x = (-b ± √(b² - 4ac)) / 2a

Share your solutions when you're done. There should be two!";

const QUADRATIC_EXPLANATION: &str = "Let's break down quadratic equations step by step.

**1. Standard form**
A quadratic equation looks like ax² + bx + c = 0, where a ≠ 0. Its graph is a parabola.

**2. Three ways to solve**
• Factoring: rewrite as (x - r)(x - s) = 0
• Completing the square: rewrite as a(x - h)² + k = 0
• Quadratic formula: x = (-b ± √(b² - 4ac)) / 2a

**3. The discriminant**
b² - 4ac tells you how many real solutions there are: positive means two, zero means one, negative means none.

Would you like to try solving one together?";

// === Trigonometry ===

const TRIG_EXAMPLES: &str = "Here are some trigonometry examples:

**Special angles:**
• sin 30° = 1/2, cos 30° = √3/2
• sin 45° = cos 45° = √2/2
• tan 60° = √3

**Solving a right triangle:**
• Hypotenuse 10, angle 30°: opposite side = 10 · sin 30° = 5

**Unit circle:**
• The point at 90° is (0, 1), so cos 90° = 0 and sin 90° = 1

Would you like to practice a few of these?";

const TRIG_EXPLANATION: &str = "Here's trigonometry step by step.

**1. Right triangles**
For an angle θ in a right triangle, SOHCAHTOA gives the ratios:
• sin θ = opposite / hypotenuse
• cos θ = adjacent / hypotenuse
• tan θ = opposite / adjacent

**2. The unit circle**
On a circle of radius 1, the point at angle θ is (cos θ, sin θ). This extends the trig ratios to every angle.

**3. Key identity**
sin²θ + cos²θ = 1

Would you like to see some worked examples?";
