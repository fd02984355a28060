//! Documentation content for sprig CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Literals,
    Output,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "precedence" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "literals" | "literal" | "values" => Some(Self::Literals),
            "output" | "json" | "filter" => Some(Self::Output),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SPRIG DOCUMENTATION

Sprig compiles boolean search expressions into filter trees, the nested
{"$and": [...], "field": {"$eq": ...}} objects most document stores accept.

DOCUMENTATION CATEGORIES

  syntax            Clauses, field paths, grouping and precedence
  operators         Comparison, membership, regex and logical operators
  literals          Numbers, strings, regexes, booleans, null and arrays
  output            The shape of the compiled filter tree

QUICK REFERENCE

  age >= 18                       Comparison
  user.address.city == 'Oslo'     Nested field path
  a == 1 and (b == 2 or c == 3)   Grouping
  not role == 'admin'             Negation
  role in ['admin', 'root']       Membership
  name ~ 'jo'                     Prefix match
  email != null                   Field exists

Run 'sprig doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Literals) => Ok(LITERALS_DOC),
        Some(DocCategory::Output) => Ok(OUTPUT_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Clauses, Paths and Grouping

CLAUSES
  field OPERATOR value
    Every expression is built from clauses. The field is always on the left
    and a literal value on the right.

    Example:
      Query:  age < 35
      Output: {"age": {"$lt": 35}}

FIELD PATHS
  a.b.c
    Dots in a field name address nested fields. Each segment becomes one
    level of nesting in the output.

    Example:
      Query:  user.address.city == 'Oslo'
      Output: {"user": {"address": {"city": {"$eq": "Oslo"}}}}

    Constraints:
      - Letters, digits, underscores and dots
      - Must start with a letter or underscore
      - Segments cannot be empty (a..b is an error)

PRECEDENCE
  not  >  and  >  or
    'and' binds tighter than 'or'; parentheses override both.

    Example:
      a == 5 and b == 6 or c == 7      is   (a and b) or c
      a == 5 and (b == 6 or c == 7)    is   a and (b or c)

KEYWORDS
  Keywords are case-insensitive: AND, Or and and are the same operator.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Comparison, Membership, Regex and Logic

COMPARISON OPERATORS
  ==    Equal                     $eq
  !=    Not equal                 $ne
  <     Less than                 $lt
  <=    Less than or equal        $lte
  >     Greater than              $gt
  >=    Greater than or equal     $gte

  Null comparisons become existence checks:
    email == null    {"email": {"$exists": false}}
    email != null    {"email": {"$exists": true}}

MEMBERSHIP OPERATORS
  in        Value is one of         $in
  not-in    Value is none of        $nin
  all       Contains every one of   $all

  The right-hand side must be an array literal:
    role in ['admin', 'root']
    tags all ['rust', 'parser']

REGEX OPERATOR
  ~     Matches                   $regex

    name ~ /^jo/i     Regex literal, passed through with its flag
    name ~ 'jo'       Quoted string, matched literally as a prefix (^jo)

LOGICAL OPERATORS
  and   &&    Both sides
  or    ||    Either side
  not   !     Negates the following clause or group
"#;

const LITERALS_DOC: &str = r#"LITERALS - Values on the Right of a Comparison

NUMBERS
  42   -7   3.14   -0.5
    Integers and floats are kept distinct.

STRINGS
  'single'   "double"
    Taken verbatim up to the matching quote. Backslashes have no special
    meaning.

REGEXES
  /pattern/   /pattern/i
    Use \/ for a literal slash. 'i' is the only supported flag.

BOOLEANS AND NULL
  true   false   null

ARRAYS
  [1, 2, 3]   ['a', "b", null]   []
    Scalars only: no nested arrays and no regexes. Elements are separated
    by single commas.
"#;

const OUTPUT_DOC: &str = r#"OUTPUT - Filter Tree Shape

LOGICAL NODES
  {"$and": [...]}   {"$or": [...]}   {"$not": {...}}
    Consecutive operators of the same kind are flattened:
      a == 1 and b == 2 and c == 3
      {"$and": [{"a": {"$eq": 1}}, {"b": {"$eq": 2}}, {"c": {"$eq": 3}}]}

FIELD NODES
  {"field": {"$op": value}}
    One level per path segment, operator mapping innermost.

REGEXES
  {"$regex": "^jo"}   {"$regex": "^jo", "$options": "i"}

The output is the same shape a caller would write by hand, so it can be
passed to a store alongside hand-written filters.
"#;
